//! # ac3-eurlex
//!
//! EUR-Lex document relevance pipeline for tracking Article 4 (AI literacy)
//! of the EU AI Act, Regulation (EU) 2024/1689.
//!
//! The crate fetches legal-document metadata from the Cellar SPARQL endpoint
//! or the EUR-Lex regulation RSS feed, scores each document against the
//! AI-literacy topic, assigns a tracking category and returns a filtered,
//! ranked envelope ready to serialize.
//!
//! ## Design
//!
//! - The two sources implement one [`DocumentSource`] trait; [`Source`] selects
//!   between them from [`FetchConfig`]
//! - Scoring and categorization are ordered rule tables
//! - Exactly one outbound request per run, no retry
//! - A failed fetch is reported as [`SourceStatus::Unavailable`], never
//!   confused with an empty result
//!
//! No network listener lives here; the HTTP API is provided by the
//! `ac3-monitor` service crate.

pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod source;
pub mod sources;
pub mod types;

pub use config::FetchConfig;
pub use error::{FetchError, Result};
pub use pipeline::{
    run_pipeline, ErrorEnvelope, Filters, PipelineRun, ResponseEnvelope, ScoringProfile,
    SourceStatus,
};
pub use query::{build_sparql_query, LookbackWindow, DEFAULT_SINCE_DAYS, MAX_SINCE_DAYS};
pub use source::DocumentSource;
pub use sources::Source;
pub use types::{Category, Document, Priority, RawRecord, ScoredDocument, SourceKind};

/// Fetch, score and rank documents using `config`.
///
/// `since` and `min_score` are the raw request parameters; unusable values
/// fall back to [`DEFAULT_SINCE_DAYS`] and
/// [`DEFAULT_MIN_SCORE`](pipeline::DEFAULT_MIN_SCORE).
///
/// # Errors
///
/// Returns [`FetchError::Config`] if `config` is invalid. Fetch failures are
/// reported through [`PipelineRun::status`] instead.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> ac3_eurlex::Result<()> {
/// let config = ac3_eurlex::FetchConfig::default();
/// let run = ac3_eurlex::monitor(&config, Some("90d"), Some("70")).await?;
/// for doc in &run.envelope.results {
///     println!("{} {}", doc.relevance_score, doc.document.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn monitor(
    config: &FetchConfig,
    since: Option<&str>,
    min_score: Option<&str>,
) -> Result<PipelineRun> {
    let source = Source::from_config(config)?;
    let now = chrono::Utc::now();
    let window = LookbackWindow::from_since(since, DEFAULT_SINCE_DAYS, now);
    let min_score = pipeline::parse_min_score(min_score, pipeline::DEFAULT_MIN_SCORE);
    Ok(run_pipeline(&source, &window, min_score, now).await)
}
