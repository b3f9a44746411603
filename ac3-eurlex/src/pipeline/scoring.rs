//! Additive keyword scoring against the AI-literacy tracking topic.
//!
//! Each profile is an ordered table of `(signal, weight)` rules. A rule fires
//! at most once per document, the fired weights are summed, and the total is
//! clamped to [`MAX_SCORE`]. Because every weight is positive the score is
//! monotonic: adding a matching signal never lowers it.
//!
//! ```text
//! knowledge profile                       feed profile
//! AI Act reference (2024r1689)   +60      article 4 / ai literacy       +50
//! article 4 / ai literacy        +50      artificial intelligence act   +20
//! artificial intelligence        +25      ai system                     +10
//! docType "implementing"         +15
//! docType "delegated"            +15
//! amend/modify/supplement        +20
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Document, SourceKind};

/// Upper bound of every relevance score.
pub const MAX_SCORE: u8 = 100;

/// Normalized fragment of the AI Act's CELEX number (`32024R1689`).
const AI_ACT_REFERENCE: &str = "2024r1689";

const ARTICLE_4_MARKERS: &[&str] = &["article 4", "ai literacy"];
const AMENDMENT_MARKERS: &[&str] = &["amend", "amendment", "modify", "supplement"];

/// Which rule table to score with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringProfile {
    /// Full rule set over SPARQL metadata (title, docType, identifier).
    Knowledge,
    /// Reduced rule set over looser feed text (title, description).
    Feed,
}

impl ScoringProfile {
    /// Profile matching the text quality of a source.
    pub fn for_source(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Sparql => Self::Knowledge,
            SourceKind::Rss => Self::Feed,
        }
    }

    fn rules(&self) -> &'static [ScoreRule] {
        match self {
            Self::Knowledge => KNOWLEDGE_RULES,
            Self::Feed => FEED_RULES,
        }
    }
}

/// Lower-cased views of a document that the rules match against.
pub(crate) struct ScoringInput<'a> {
    pub(crate) document: &'a Document,
    pub(crate) text: String,
    pub(crate) doc_type: String,
}

impl<'a> ScoringInput<'a> {
    pub(crate) fn new(document: &'a Document, profile: ScoringProfile) -> Self {
        let text = match profile {
            ScoringProfile::Knowledge => format!(
                "{} {} {}",
                document.title, document.doc_type, document.identifier
            ),
            ScoringProfile::Feed => format!("{} {}", document.title, document.description),
        }
        .to_lowercase();

        Self {
            document,
            text,
            doc_type: document.doc_type.to_lowercase(),
        }
    }

    pub(crate) fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    pub(crate) fn has_article_4_marker(&self) -> bool {
        self.contains_any(ARTICLE_4_MARKERS)
    }
}

struct ScoreRule {
    signal: &'static str,
    weight: u8,
    applies: fn(&ScoringInput<'_>) -> bool,
}

const KNOWLEDGE_RULES: &[ScoreRule] = &[
    ScoreRule {
        signal: "ai act reference",
        weight: 60,
        applies: |input| {
            references_ai_act(&input.document.identifier) || references_ai_act(&input.document.title)
        },
    },
    ScoreRule {
        signal: "article 4 / ai literacy",
        weight: 50,
        applies: |input| input.has_article_4_marker(),
    },
    ScoreRule {
        signal: "artificial intelligence",
        weight: 25,
        applies: |input| input.text.contains("artificial intelligence"),
    },
    ScoreRule {
        signal: "implementing act",
        weight: 15,
        applies: |input| input.doc_type.contains("implementing"),
    },
    ScoreRule {
        signal: "delegated act",
        weight: 15,
        applies: |input| input.doc_type.contains("delegated"),
    },
    ScoreRule {
        signal: "amendment",
        weight: 20,
        applies: |input| input.contains_any(AMENDMENT_MARKERS),
    },
];

const FEED_RULES: &[ScoreRule] = &[
    ScoreRule {
        signal: "article 4 / ai literacy",
        weight: 50,
        applies: |input| input.has_article_4_marker(),
    },
    ScoreRule {
        signal: "artificial intelligence act",
        weight: 20,
        applies: |input| input.text.contains("artificial intelligence act"),
    },
    ScoreRule {
        signal: "ai system",
        weight: 10,
        applies: |input| input.text.contains("ai system"),
    },
];

/// Whether `value` refers to Regulation (EU) 2024/1689, ignoring case and punctuation.
pub fn references_ai_act(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    normalized.contains(AI_ACT_REFERENCE)
}

/// Relevance score of `document` under `profile`, in `0..=MAX_SCORE`.
pub fn score(document: &Document, profile: ScoringProfile) -> u8 {
    let input = ScoringInput::new(document, profile);
    let total: u32 = profile
        .rules()
        .iter()
        .filter(|rule| (rule.applies)(&input))
        .map(|rule| u32::from(rule.weight))
        .sum();
    u8::try_from(total.min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
}

/// Names of the signals that fired for `document`, in rule order.
pub fn matched_signals(document: &Document, profile: ScoringProfile) -> Vec<&'static str> {
    let input = ScoringInput::new(document, profile);
    profile
        .rules()
        .iter()
        .filter(|rule| (rule.applies)(&input))
        .map(|rule| rule.signal)
        .collect()
}
