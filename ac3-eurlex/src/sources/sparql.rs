//! Cellar knowledge graph source queried over SPARQL.
//!
//! The query from [`build_sparql_query`] is POSTed as a `query=` form body and
//! the `results.bindings` array of the JSON result set becomes the record list.

use serde::Deserialize;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http;
use crate::query::{build_sparql_query, topical_signal_names, LookbackWindow};
use crate::source::DocumentSource;
use crate::types::{RawRecord, SourceKind, SparqlBinding};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// SPARQL endpoint source.
#[derive(Debug, Clone)]
pub struct SparqlSource {
    client: reqwest::Client,
    endpoint: String,
    limit: usize,
    timeout_seconds: u64,
}

impl SparqlSource {
    /// Build a source for the endpoint in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: http::build_client(config, SourceKind::Sparql)?,
            endpoint: config.sparql_endpoint.clone(),
            limit: config.result_limit,
            timeout_seconds: config.timeout_for(SourceKind::Sparql),
        })
    }
}

impl DocumentSource for SparqlSource {
    async fn fetch(&self, window: &LookbackWindow) -> Result<Vec<RawRecord>, FetchError> {
        let query = build_sparql_query(window, self.limit);
        tracing::debug!(
            cutoff = %window.cutoff(),
            limit = self.limit,
            signals = ?topical_signal_names(),
            "querying SPARQL endpoint"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_seconds))?
            .error_for_status()
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_seconds))?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_seconds))?;

        tracing::trace!(bytes = body.len(), "SPARQL response received");

        parse_sparql_results(&body)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Sparql
    }

    fn describe_query(&self, window: &LookbackWindow) -> Option<String> {
        Some(build_sparql_query(window, self.limit))
    }
}

#[derive(Deserialize)]
struct ResultSet {
    results: Bindings,
}

#[derive(Deserialize)]
struct Bindings {
    #[serde(default)]
    bindings: Vec<SparqlBinding>,
}

/// Parse a SPARQL JSON result set into records.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] if the body is not a result set.
pub fn parse_sparql_results(body: &str) -> Result<Vec<RawRecord>, FetchError> {
    let set: ResultSet = serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("invalid SPARQL result set: {e}")))?;
    Ok(set
        .results
        .bindings
        .into_iter()
        .map(RawRecord::Binding)
        .collect())
}
