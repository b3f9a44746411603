//! Result filtering, ranking and the response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::scoring::MAX_SCORE;
use crate::types::ScoredDocument;

/// Minimum score applied when `minScore` is absent or unusable.
pub const DEFAULT_MIN_SCORE: u8 = 60;

/// Guidance attached to successful responses with no results.
pub const EMPTY_RESULTS_HINT: &str =
    "No documents matched; try a wider window such as since=730d or a lower minScore";

/// Filters echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub since: String,
    pub min_score: u8,
}

/// Whether the source answered. Kept apart from an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Available,
    Unavailable(String),
}

impl SourceStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    pub fetched_at: DateTime<Utc>,
    pub source: String,
    pub filters: Filters,
    pub total_results: usize,
    pub results: Vec<ScoredDocument>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warning: Option<String>,
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Parse a raw `minScore` parameter.
///
/// Surrounding whitespace is ignored and values are clamped to `0..=100`.
/// Missing or non-integer input yields `default`.
pub fn parse_min_score(raw: Option<&str>, default: u8) -> u8 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.clamp(0, i64::from(MAX_SCORE)))
        .and_then(|n| u8::try_from(n).ok())
        .unwrap_or(default)
}

/// Keep documents scoring at least `min_score`, highest first.
///
/// The sort is stable, so equal scores keep their fetch order.
pub fn filter_and_rank(documents: Vec<ScoredDocument>, min_score: u8) -> Vec<ScoredDocument> {
    let mut kept: Vec<ScoredDocument> = documents
        .into_iter()
        .filter(|d| d.relevance_score >= min_score)
        .collect();
    kept.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    kept
}

/// Build the success envelope for one pipeline run.
pub fn assemble(
    documents: Vec<ScoredDocument>,
    filters: Filters,
    source: &str,
    status: &SourceStatus,
    fetched_at: DateTime<Utc>,
) -> ResponseEnvelope {
    let results = filter_and_rank(documents, filters.min_score);

    let warning = match status {
        SourceStatus::Available => None,
        SourceStatus::Unavailable(reason) => Some(format!("{source} unavailable: {reason}")),
    };
    let message = results.is_empty().then(|| EMPTY_RESULTS_HINT.to_owned());

    ResponseEnvelope {
        success: true,
        fetched_at,
        source: source.to_owned(),
        filters,
        total_results: results.len(),
        results,
        message,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Priority};

    fn scored(title: &str, score: u8) -> ScoredDocument {
        ScoredDocument {
            document: Document {
                title: title.into(),
                url: String::new(),
                identifier: String::new(),
                doc_type: "EU Document".into(),
                pub_date: String::new(),
                source: "EUR-Lex SPARQL".into(),
                description: String::new(),
            },
            relevance_score: score,
            category: None,
            tracked_law: String::new(),
            priority: Priority::Medium,
            jurisdiction: "EU".into(),
        }
    }

    fn filters(min_score: u8) -> Filters {
        Filters {
            since: "365d".into(),
            min_score,
        }
    }

    #[test]
    fn min_score_parsing() {
        assert_eq!(parse_min_score(None, 60), 60);
        assert_eq!(parse_min_score(Some("75"), 60), 75);
        assert_eq!(parse_min_score(Some(" 40 "), 60), 40);
        assert_eq!(parse_min_score(Some("0"), 60), 0);
        assert_eq!(parse_min_score(Some("250"), 60), 100);
        assert_eq!(parse_min_score(Some("-5"), 60), 0);
        assert_eq!(parse_min_score(Some("abc"), 60), 60);
        assert_eq!(parse_min_score(Some("7.5"), 60), 60);
        assert_eq!(parse_min_score(Some(""), 60), 60);
    }

    #[test]
    fn filters_below_threshold_and_sorts_descending() {
        let docs = vec![scored("a", 50), scored("b", 85), scored("c", 60), scored("d", 100)];
        let envelope = assemble(docs, filters(60), "EUR-Lex SPARQL", &SourceStatus::Available, Utc::now());
        let scores: Vec<u8> = envelope.results.iter().map(|d| d.relevance_score).collect();
        assert_eq!(scores, vec![100, 85, 60]);
        assert_eq!(envelope.total_results, 3);
        assert!(envelope.message.is_none());
        assert!(envelope.warning.is_none());
    }

    #[test]
    fn sort_is_stable_for_equal_scores() {
        let docs = vec![scored("first", 70), scored("second", 90), scored("third", 70)];
        let ranked = filter_and_rank(docs, 0);
        let titles: Vec<&str> = ranked.iter().map(|d| d.document.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first", "third"]);
    }

    #[test]
    fn empty_result_is_success_with_hint() {
        let envelope = assemble(Vec::new(), filters(60), "EUR-Lex SPARQL", &SourceStatus::Available, Utc::now());
        assert!(envelope.success);
        assert_eq!(envelope.total_results, 0);
        assert_eq!(envelope.message.as_deref(), Some(EMPTY_RESULTS_HINT));
        assert!(envelope.warning.is_none());
    }

    #[test]
    fn unavailable_source_adds_warning() {
        let status = SourceStatus::Unavailable("source timed out after 30s".into());
        let envelope = assemble(Vec::new(), filters(60), "EUR-Lex SPARQL", &status, Utc::now());
        assert!(envelope.success);
        assert_eq!(
            envelope.warning.as_deref(),
            Some("EUR-Lex SPARQL unavailable: source timed out after 30s")
        );
        assert!(!status.is_available());
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let envelope = assemble(vec![scored("a", 90)], filters(60), "EUR-Lex RSS", &SourceStatus::Available, Utc::now());
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["totalResults"], 1);
        assert_eq!(value["filters"]["minScore"], 60);
        assert_eq!(value["filters"]["since"], "365d");
        assert!(value["fetchedAt"].is_string());
        assert!(value.get("message").is_none());
        assert!(value.get("warning").is_none());
    }

    #[test]
    fn error_envelope_shape() {
        let value = serde_json::to_value(ErrorEnvelope::new("bad gateway")).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "error": "bad gateway"}));
    }
}
