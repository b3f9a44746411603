//! Shared HTTP client for source requests.
//!
//! Every request carries the configured User-Agent and is bounded by the
//! timeout of the selected source.

use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::types::SourceKind;

/// Build a [`reqwest::Client`] for requests to a `kind` source.
///
/// The client has:
/// - Timeout from [`FetchConfig::timeout_for`]
/// - The configured User-Agent
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the client cannot be constructed.
pub fn build_client(
    config: &FetchConfig,
    kind: SourceKind,
) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_for(kind)))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| FetchError::Http(format!("failed to build HTTP client: {e}")))
}
