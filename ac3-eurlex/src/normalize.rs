//! Mapping of source-native records into [`Document`]s.
//!
//! CELEX identifiers embed the year and a document-type letter code
//! (`3` sector, `2024` year, `R` regulation, `1689` number). The type label is
//! derived from that code; absent fields always become empty strings.

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use crate::types::{Document, FeedItem, RawRecord, SourceKind, SparqlBinding};

/// EUR-Lex document viewer, parameterised with `uri=CELEX:<id>`.
const EURLEX_VIEWER: &str = "https://eur-lex.europa.eu/legal-content/EN/TXT/";

/// Label used when the identifier carries no known type code.
pub const GENERIC_DOC_TYPE: &str = "EU Document";

static DOC_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}([A-Z]+)").expect("valid document code pattern"));

static REGULATION_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\d+").expect("valid regulation number pattern"));

static CELEX_IN_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CELEX(?::|%3A)([0-9A-Z()\-]+)").expect("valid CELEX link pattern")
});

/// Normalize one raw record. `feed_name` labels documents from the RSS source.
pub fn normalize(record: RawRecord, feed_name: &str) -> Document {
    match record {
        RawRecord::Binding(binding) => normalize_binding(binding),
        RawRecord::Item(item) => normalize_item(item, feed_name),
    }
}

/// Normalize a SPARQL binding. The title falls back to `"Document <id>"`.
pub fn normalize_binding(binding: SparqlBinding) -> Document {
    let identifier = binding
        .celex_id
        .map(|v| v.value.trim().to_owned())
        .unwrap_or_default();

    let title = binding
        .title
        .map(|v| v.value.trim().to_owned())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Document {identifier}").trim_end().to_owned());

    let url = if identifier.is_empty() {
        String::new()
    } else {
        celex_url(&identifier)
    };

    Document {
        doc_type: doc_type_for(&identifier).to_owned(),
        url,
        title,
        pub_date: binding
            .date
            .map(|v| v.value.trim().to_owned())
            .unwrap_or_default(),
        source: SourceKind::Sparql.name().to_owned(),
        description: String::new(),
        identifier,
    }
}

/// Normalize an RSS item. The link is kept verbatim; the identifier is the
/// CELEX number found in the link or guid, else the guid itself.
pub fn normalize_item(item: FeedItem, source: &str) -> Document {
    let link = item.link.map(|l| l.trim().to_owned()).unwrap_or_default();
    let guid = item.guid.map(|g| g.trim().to_owned()).unwrap_or_default();

    let identifier = celex_from_link(&link)
        .or_else(|| celex_from_link(&guid))
        .unwrap_or(guid);

    Document {
        title: item.title.map(|t| t.trim().to_owned()).unwrap_or_default(),
        doc_type: doc_type_for(&identifier).to_owned(),
        url: link,
        pub_date: item.pub_date.map(|d| d.trim().to_owned()).unwrap_or_default(),
        source: source.to_owned(),
        description: item
            .description
            .map(|d| strip_markup(&d))
            .unwrap_or_default(),
        identifier,
    }
}

/// Derive the document-type label from a CELEX identifier.
///
/// An `R<digits>` run outside a `DC` identifier marks a regulation and wins
/// over the generic code table.
pub fn doc_type_for(identifier: &str) -> &'static str {
    if !identifier.contains("DC") && REGULATION_NUMBER_REGEX.is_match(identifier) {
        return "Regulation";
    }

    let code = DOC_CODE_REGEX
        .captures(identifier)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());

    match code {
        Some("R") => "Regulation",
        Some("L") => "Directive",
        Some("D") => "Decision",
        Some("DC") => "Commission Document",
        Some("SC") => "Council Document",
        _ => GENERIC_DOC_TYPE,
    }
}

/// Canonical EUR-Lex viewer URL for a CELEX identifier.
pub fn celex_url(identifier: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(identifier.as_bytes()).collect();
    format!("{EURLEX_VIEWER}?uri=CELEX:{encoded}")
}

fn celex_from_link(link: &str) -> Option<String> {
    CELEX_IN_LINK_REGEX
        .captures(link)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// Reduce an HTML fragment to whitespace-collapsed text.
fn strip_markup(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let text: String = parsed.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
