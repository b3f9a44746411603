//! EUR-Lex regulation RSS feed.
//!
//! The feed carries no server-side filtering, so items are narrowed to the
//! lookback window after parsing. Items whose `pubDate` is missing or not
//! RFC 2822 are kept.

use chrono::DateTime;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http;
use crate::query::LookbackWindow;
use crate::source::DocumentSource;
use crate::types::{FeedItem, RawRecord, SourceKind};

/// RSS feed source.
#[derive(Debug, Clone)]
pub struct FeedSource {
    client: reqwest::Client,
    url: String,
    name: String,
    timeout_seconds: u64,
}

impl FeedSource {
    /// Build a source for the feed in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: http::build_client(config, SourceKind::Rss)?,
            url: config.feed_url.clone(),
            name: config.feed_name.clone(),
            timeout_seconds: config.timeout_for(SourceKind::Rss),
        })
    }
}

impl DocumentSource for FeedSource {
    async fn fetch(&self, window: &LookbackWindow) -> Result<Vec<RawRecord>, FetchError> {
        tracing::debug!(url = %self.url, "polling RSS feed");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_seconds))?
            .error_for_status()
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_seconds))?;

        let xml = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_seconds))?;

        tracing::trace!(bytes = xml.len(), "RSS response received");

        let items = parse_feed(&xml)?;
        let total = items.len();
        let kept: Vec<RawRecord> = items
            .into_iter()
            .filter(|item| within_window(item, window))
            .map(RawRecord::Item)
            .collect();

        tracing::debug!(total, kept = kept.len(), "feed items inside window");
        Ok(kept)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Rss
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Parse an RSS 2.0 document into its `channel/item` entries.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] if the body is not well-formed XML or the
/// root element is not `<rss>`.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedItem>, FetchError> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| FetchError::Parse(format!("invalid RSS document: {e}")))?;

    let root = doc.root_element();
    if !root.has_tag_name("rss") {
        return Err(FetchError::Parse(format!(
            "expected <rss> root, found <{}>",
            root.tag_name().name()
        )));
    }

    let items = root
        .children()
        .filter(|n| n.has_tag_name("channel"))
        .flat_map(|channel| channel.children().filter(|n| n.has_tag_name("item")))
        .map(|item| FeedItem {
            title: child_text(item, "title"),
            description: child_text(item, "description"),
            link: child_text(item, "link"),
            pub_date: child_text(item, "pubDate"),
            guid: child_text(item, "guid"),
        })
        .collect();

    Ok(items)
}

/// Text content of the first `name` child, including CDATA sections.
fn child_text(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    node.children().find(|n| n.has_tag_name(name)).map(|n| {
        n.descendants()
            .filter(|d| d.is_text())
            .filter_map(|d| d.text())
            .collect::<String>()
    })
}

fn within_window(item: &FeedItem, window: &LookbackWindow) -> bool {
    match item
        .pub_date
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc2822(raw.trim()).ok())
    {
        Some(published) => window.contains(published.date_naive()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>EUR-Lex regulations</title>
    <item>
      <title>Commission Implementing Regulation on AI literacy</title>
      <description><![CDATA[<p>Guidance on <b>Article 4</b></p>]]></description>
      <link>https://eur-lex.europa.eu/legal-content/EN/TXT/?uri=CELEX:32025R0042</link>
      <pubDate>Mon, 10 Mar 2025 00:00:00 GMT</pubDate>
      <guid>CELEX:32025R0042</guid>
    </item>
    <item>
      <title>Fisheries quotas</title>
      <pubDate>Tue, 02 Jan 2024 00:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Undated notice</title>
    </item>
  </channel>
</rss>"#;

    fn window(days: u32) -> LookbackWindow {
        LookbackWindow::new(days, Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap())
    }

    #[test]
    fn parses_items_with_cdata() {
        let items = parse_feed(SAMPLE).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0].title.as_deref(),
            Some("Commission Implementing Regulation on AI literacy")
        );
        assert_eq!(
            items[0].description.as_deref(),
            Some("<p>Guidance on <b>Article 4</b></p>")
        );
        assert_eq!(items[0].guid.as_deref(), Some("CELEX:32025R0042"));
        assert!(items[2].link.is_none());
    }

    #[test]
    fn non_rss_root_is_parse_error() {
        let err = parse_feed("<feed><entry/></feed>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(err.to_string().contains("<feed>"));
    }

    #[test]
    fn malformed_xml_is_parse_error() {
        assert!(matches!(
            parse_feed("<rss><channel>").unwrap_err(),
            FetchError::Parse(_)
        ));
    }

    #[test]
    fn channel_without_items_is_empty() {
        let items = parse_feed("<rss><channel><title>x</title></channel></rss>").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn window_drops_old_items_and_keeps_undated() {
        let items = parse_feed(SAMPLE).unwrap();
        let kept: Vec<_> = items.iter().filter(|i| within_window(i, &window(60))).collect();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].title.as_deref(), Some("Undated notice"));
    }

    #[test]
    fn unparseable_date_is_kept() {
        let item = FeedItem {
            pub_date: Some("last Tuesday".into()),
            ..Default::default()
        };
        assert!(within_window(&item, &window(1)));
    }

    #[test]
    fn label_is_configured_feed_name() {
        let config = FetchConfig {
            feed_name: "EUR-Lex OJ L".into(),
            ..Default::default()
        };
        let source = FeedSource::new(&config).unwrap();
        assert_eq!(source.label(), "EUR-Lex OJ L");
        assert_eq!(source.kind(), SourceKind::Rss);
    }
}
