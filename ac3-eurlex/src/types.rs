//! Core types: source identification, raw records, normalized and scored documents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported document sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Cellar knowledge graph queried over SPARQL.
    #[default]
    Sparql,
    /// EUR-Lex regulation RSS feed.
    Rss,
}

impl SourceKind {
    /// Returns the provenance label stamped on documents from this source.
    ///
    /// The RSS label can be overridden per feed through
    /// [`FetchConfig::feed_name`](crate::FetchConfig::feed_name).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sparql => "EUR-Lex SPARQL",
            Self::Rss => "EUR-Lex RSS",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single SPARQL result term. Only the lexical value is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlValue {
    pub value: String,
}

/// One row of a SPARQL JSON result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlBinding {
    #[serde(rename = "celexId", default)]
    pub celex_id: Option<SparqlValue>,
    #[serde(default)]
    pub title: Option<SparqlValue>,
    #[serde(default)]
    pub date: Option<SparqlValue>,
}

/// One `<item>` of an RSS channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub guid: Option<String>,
}

/// Source-native record, produced once per fetch and discarded after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    Binding(SparqlBinding),
    Item(FeedItem),
}

/// A normalized document. Absent source fields are empty strings, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub url: String,
    /// CELEX number, or the feed item guid. May be empty for feed documents.
    pub identifier: String,
    pub doc_type: String,
    pub pub_date: String,
    pub source: String,
    /// Plain-text feed description; empty for SPARQL documents.
    pub description: String,
}

/// Tracking bucket assigned by the categorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CoreRegulation,
    Guidance,
    Amendment,
    Discovery,
}

/// Follow-up urgency for a scored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
}

/// A document with its relevance score and tracking classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: Document,
    pub relevance_score: u8,
    /// Absent for documents scored with the feed profile.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<Category>,
    pub tracked_law: String,
    pub priority: Priority,
    pub jurisdiction: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document {
            title: "Regulation (EU) 2024/1689".into(),
            url: "https://eur-lex.europa.eu/legal-content/EN/TXT/?uri=CELEX:32024R1689".into(),
            identifier: "32024R1689".into(),
            doc_type: "Regulation".into(),
            pub_date: "2024-06-13".into(),
            source: "EUR-Lex SPARQL".into(),
            description: String::new(),
        }
    }

    #[test]
    fn source_kind_display() {
        assert_eq!(SourceKind::Sparql.to_string(), "EUR-Lex SPARQL");
        assert_eq!(SourceKind::Rss.to_string(), "EUR-Lex RSS");
    }

    #[test]
    fn source_kind_parses_from_config_names() {
        let kind: SourceKind = serde_json::from_str("\"rss\"").expect("deserialize");
        assert_eq!(kind, SourceKind::Rss);
        assert_eq!(SourceKind::default(), SourceKind::Sparql);
    }

    #[test]
    fn binding_ignores_term_metadata() {
        let json = r#"{
            "celexId": {"type": "literal", "value": "32024R1689"},
            "title": {"type": "literal", "xml:lang": "en", "value": "AI Act"}
        }"#;
        let binding: SparqlBinding = serde_json::from_str(json).expect("deserialize");
        assert_eq!(binding.celex_id.map(|v| v.value).as_deref(), Some("32024R1689"));
        assert_eq!(binding.title.map(|v| v.value).as_deref(), Some("AI Act"));
        assert!(binding.date.is_none());
    }

    #[test]
    fn scored_document_serializes_flat_camel_case() {
        let scored = ScoredDocument {
            document: sample_document(),
            relevance_score: 85,
            category: Some(Category::CoreRegulation),
            tracked_law: "EU AI Act".into(),
            priority: Priority::High,
            jurisdiction: "EU".into(),
        };
        let value = serde_json::to_value(&scored).expect("serialize");
        assert_eq!(value["relevanceScore"], 85);
        assert_eq!(value["docType"], "Regulation");
        assert_eq!(value["pubDate"], "2024-06-13");
        assert_eq!(value["category"], "core_regulation");
        assert_eq!(value["trackedLaw"], "EU AI Act");
        assert_eq!(value["priority"], "High");
        assert!(value.get("document").is_none());
    }

    #[test]
    fn uncategorized_document_omits_category() {
        let scored = ScoredDocument {
            document: sample_document(),
            relevance_score: 50,
            category: None,
            tracked_law: String::new(),
            priority: Priority::Medium,
            jurisdiction: "EU".into(),
        };
        let value = serde_json::to_value(&scored).expect("serialize");
        assert!(value.get("category").is_none());
        assert_eq!(value["trackedLaw"], "");
    }

    #[test]
    fn category_names_match_serde() {
        for (category, name) in [
            (Category::CoreRegulation, "core_regulation"),
            (Category::Guidance, "guidance"),
            (Category::Amendment, "amendment"),
            (Category::Discovery, "discovery"),
        ] {
            let json = serde_json::to_string(&category).expect("serialize");
            assert_eq!(json, format!("\"{name}\""));
        }
    }
}
