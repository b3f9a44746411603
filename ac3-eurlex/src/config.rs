//! Fetch configuration with sensible defaults.
//!
//! [`FetchConfig`] controls which source is queried, where it lives, how long
//! a request may take, and the identity sent with every request. It is built
//! once at startup and shared read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::types::SourceKind;

/// Default Cellar SPARQL endpoint serving EUR-Lex metadata.
pub const DEFAULT_SPARQL_ENDPOINT: &str = "https://publications.europa.eu/webapi/rdf/sparql";

/// Default EUR-Lex regulation RSS feed (English).
pub const DEFAULT_FEED_URL: &str =
    "https://eur-lex.europa.eu/EN/display-rss.do?resourceType=regulation&language=en";

/// Default User-Agent attached to every outbound request.
pub const DEFAULT_USER_AGENT: &str = "AC3-Monitor/1.0";

/// Configuration for the document source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Which source implementation the pipeline reads from.
    pub kind: SourceKind,
    /// SPARQL endpoint receiving the query as a POST form body.
    pub sparql_endpoint: String,
    /// RSS feed URL polled with a single GET.
    pub feed_url: String,
    /// Provenance label stamped on feed documents.
    pub feed_name: String,
    /// Request timeout for the SPARQL endpoint, in seconds.
    pub sparql_timeout_seconds: u64,
    /// Request timeout for the RSS feed, in seconds.
    pub feed_timeout_seconds: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// `LIMIT` applied to the SPARQL query.
    pub result_limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Sparql,
            sparql_endpoint: DEFAULT_SPARQL_ENDPOINT.to_owned(),
            feed_url: DEFAULT_FEED_URL.to_owned(),
            feed_name: "EUR-Lex RSS".to_owned(),
            sparql_timeout_seconds: 30,
            feed_timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            result_limit: 100,
        }
    }
}

impl FetchConfig {
    /// Request timeout for the given source kind.
    pub fn timeout_for(&self, kind: SourceKind) -> u64 {
        match kind {
            SourceKind::Sparql => self.sparql_timeout_seconds,
            SourceKind::Rss => self.feed_timeout_seconds,
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - both timeouts must be greater than 0
    /// - `result_limit` must be greater than 0
    /// - `user_agent` must not be blank
    /// - the endpoint of the selected source must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.sparql_timeout_seconds == 0 || self.feed_timeout_seconds == 0 {
            return Err(FetchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.result_limit == 0 {
            return Err(FetchError::Config(
                "result_limit must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(FetchError::Config("user_agent must not be empty".into()));
        }
        let endpoint = match self.kind {
            SourceKind::Sparql => &self.sparql_endpoint,
            SourceKind::Rss => &self.feed_url,
        };
        let parsed = url::Url::parse(endpoint)
            .map_err(|e| FetchError::Config(format!("invalid endpoint URL {endpoint:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::Config(format!(
                "endpoint URL must be http or https, got {}",
                parsed.scheme()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = FetchConfig::default();
        assert_eq!(config.kind, SourceKind::Sparql);
        assert_eq!(config.sparql_timeout_seconds, 30);
        assert_eq!(config.feed_timeout_seconds, 10);
        assert_eq!(config.user_agent, "AC3-Monitor/1.0");
        assert_eq!(config.result_limit, 100);
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(FetchConfig::default().validate().is_ok());
    }

    #[test]
    fn timeout_follows_source_kind() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout_for(SourceKind::Sparql), 30);
        assert_eq!(config.timeout_for(SourceKind::Rss), 10);
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = FetchConfig {
            feed_timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_limit_rejected() {
        let config = FetchConfig {
            result_limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("result_limit"));
    }

    #[test]
    fn blank_user_agent_rejected() {
        let config = FetchConfig {
            user_agent: "   ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("user_agent"));
    }

    #[test]
    fn malformed_endpoint_rejected() {
        let config = FetchConfig {
            sparql_endpoint: "not a url".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_scheme_rejected() {
        let config = FetchConfig {
            kind: SourceKind::Rss,
            feed_url: "ftp://eur-lex.europa.eu/feed".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn only_selected_endpoint_is_checked() {
        let config = FetchConfig {
            kind: SourceKind::Rss,
            sparql_endpoint: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_partial_section() {
        let json = r#"{"kind": "rss", "feed_timeout_seconds": 5}"#;
        let config: FetchConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.kind, SourceKind::Rss);
        assert_eq!(config.feed_timeout_seconds, 5);
        assert_eq!(config.sparql_timeout_seconds, 30);
    }
}
