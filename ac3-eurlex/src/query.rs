//! Lookback window and SPARQL query construction.
//!
//! The query deliberately over-fetches: it keeps anything whose identifier or
//! English title loosely refers to the AI Act and leaves the narrowing to the
//! scorer and categorizer.

use chrono::{DateTime, Days, NaiveDate, Utc};

/// Days back used when `since` is absent or unusable.
pub const DEFAULT_SINCE_DAYS: u32 = 365;

/// Longest accepted lookback, roughly a century.
pub const MAX_SINCE_DAYS: u32 = 36_500;

/// Date range a pipeline run considers, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    days_back: u32,
    cutoff: NaiveDate,
}

impl LookbackWindow {
    /// Window of `days_back` days ending at `now`, clamped to
    /// `1..=MAX_SINCE_DAYS`.
    pub fn new(days_back: u32, now: DateTime<Utc>) -> Self {
        let days_back = days_back.clamp(1, MAX_SINCE_DAYS);
        let cutoff = now
            .date_naive()
            .checked_sub_days(Days::new(u64::from(days_back)))
            .unwrap_or(NaiveDate::MIN);
        Self { days_back, cutoff }
    }

    /// Build a window from a raw `since` parameter.
    ///
    /// Accepts `"<N>d"` (relative days), `YYYY-MM-DD`, or an RFC 3339
    /// timestamp. Zero, future, malformed, or longer than [`MAX_SINCE_DAYS`]
    /// values fall back to `default_days`.
    pub fn from_since(raw: Option<&str>, default_days: u32, now: DateTime<Utc>) -> Self {
        let days = raw
            .and_then(|s| parse_since_days(s, now))
            .unwrap_or(default_days);
        Self::new(days, now)
    }

    pub fn days_back(&self) -> u32 {
        self.days_back
    }

    /// First day included in the window.
    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    /// Cutoff formatted as `YYYY-MM-DD`.
    pub fn cutoff_string(&self) -> String {
        self.cutoff.format("%Y-%m-%d").to_string()
    }

    /// Canonical `since` form echoed back in the response filters.
    pub fn since_label(&self) -> String {
        format!("{}d", self.days_back)
    }

    /// Whether a document dated `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.cutoff
    }
}

fn parse_since_days(raw: &str, now: DateTime<Utc>) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(count) = raw.strip_suffix('d').or_else(|| raw.strip_suffix('D')) {
        return count
            .parse::<u32>()
            .ok()
            .filter(|&days| (1..=MAX_SINCE_DAYS).contains(&days));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.with_timezone(&Utc).date_naive())
        })?;

    let days = (now.date_naive() - date).num_days();
    if days < 0 {
        return None;
    }
    u32::try_from(days.max(1))
        .ok()
        .filter(|&days| days <= MAX_SINCE_DAYS)
}

/// One topical disjunct of the SPARQL filter.
struct TopicalSignal {
    name: &'static str,
    expression: &'static str,
}

const TOPICAL_SIGNALS: &[TopicalSignal] = &[
    TopicalSignal {
        name: "regulation number",
        expression: r#"CONTAINS(LCASE(STR(?celexId)), "1689")"#,
    },
    TopicalSignal {
        name: "artificial intelligence",
        expression: r#"(CONTAINS(LCASE(STR(?title)), "artificial") && CONTAINS(LCASE(STR(?title)), "intelligence"))"#,
    },
    TopicalSignal {
        name: "ai act",
        expression: r#"CONTAINS(LCASE(STR(?title)), "ai act")"#,
    },
    TopicalSignal {
        name: "official reference",
        expression: r#"CONTAINS(LCASE(STR(?title)), "2024/1689")"#,
    },
];

/// Names of the topical signals, in the order they appear in the filter.
pub(crate) fn topical_signal_names() -> Vec<&'static str> {
    TOPICAL_SIGNALS.iter().map(|s| s.name).collect()
}

/// Build the SPARQL query for `window`, newest documents first, capped at `limit` rows.
pub fn build_sparql_query(window: &LookbackWindow, limit: usize) -> String {
    let topical = TOPICAL_SIGNALS
        .iter()
        .map(|s| s.expression)
        .collect::<Vec<_>>()
        .join("\n    || ");

    format!(
        r#"PREFIX cdm: <http://publications.europa.eu/ontology/cdm#>
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>

SELECT DISTINCT ?celexId ?title ?date WHERE {{
  ?work cdm:resource_legal_id_celex ?celexId ;
        cdm:work_date_document ?date .
  OPTIONAL {{
    ?expression cdm:expression_belongs_to_work ?work ;
                cdm:expression_title ?title ;
                cdm:expression_uses_language <http://publications.europa.eu/resource/authority/language/ENG> .
  }}
  FILTER(?date >= "{cutoff}"^^xsd:date)
  FILTER(
    {topical}
  )
}}
ORDER BY DESC(?date)
LIMIT {limit}"#,
        cutoff = window.cutoff_string(),
    )
}
