//! Relevance and categorization pipeline.
//!
//! One run performs a single fetch and then works purely in memory:
//!
//! ```text
//! fetch(window) -> normalize -> score -> classify -> filter/rank -> envelope
//! ```
//!
//! Apart from the lookback cutoff, the output depends only on the fetched
//! records, so identical payloads always produce identical results.

pub mod assemble;
pub mod categorize;
pub mod scoring;

use chrono::{DateTime, Utc};

use crate::normalize::normalize;
use crate::query::LookbackWindow;
use crate::source::DocumentSource;
use crate::types::{RawRecord, ScoredDocument};

pub use assemble::{
    assemble, filter_and_rank, parse_min_score, ErrorEnvelope, Filters, ResponseEnvelope,
    SourceStatus, DEFAULT_MIN_SCORE, EMPTY_RESULTS_HINT,
};
pub use categorize::{categorize, classify, Classification};
pub use scoring::{matched_signals, score, ScoringProfile, MAX_SCORE};

/// Jurisdiction stamped on every scored document.
pub const JURISDICTION: &str = "EU";

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Whether the fetch succeeded. An unavailable source yields an empty,
    /// still successful, envelope.
    pub status: SourceStatus,
    pub envelope: ResponseEnvelope,
}

/// Normalize, score and classify raw records, preserving their order.
pub fn process_records(
    records: Vec<RawRecord>,
    profile: ScoringProfile,
    feed_name: &str,
) -> Vec<ScoredDocument> {
    records
        .into_iter()
        .map(|record| {
            let document = normalize(record, feed_name);
            let relevance_score = score(&document, profile);
            let classification = classify(&document, relevance_score, profile);
            tracing::trace!(
                identifier = %document.identifier,
                score = relevance_score,
                signals = ?matched_signals(&document, profile),
                "document scored"
            );
            ScoredDocument {
                document,
                relevance_score,
                category: classification.category,
                tracked_law: classification.tracked_law.to_owned(),
                priority: classification.priority,
                jurisdiction: JURISDICTION.to_owned(),
            }
        })
        .collect()
}

/// Run the full pipeline against `source`.
///
/// Fetch failures never escape: they become [`SourceStatus::Unavailable`]
/// with an empty result set and a warning on the envelope.
pub async fn run_pipeline<S: DocumentSource>(
    source: &S,
    window: &LookbackWindow,
    min_score: u8,
    now: DateTime<Utc>,
) -> PipelineRun {
    let (records, status) = match source.fetch(window).await {
        Ok(records) => (records, SourceStatus::Available),
        Err(err) => {
            tracing::warn!(source = source.label(), error = %err, "source fetch failed");
            (Vec::new(), SourceStatus::Unavailable(err.to_string()))
        }
    };

    let fetched = records.len();
    tracing::debug!(source = source.label(), fetched, "records fetched");

    let scored = process_records(records, source.scoring_profile(), source.label());
    let filters = Filters {
        since: window.since_label(),
        min_score,
    };
    let envelope = assemble(scored, filters, source.label(), &status, now);

    tracing::info!(
        source = source.label(),
        fetched,
        matched = envelope.total_results,
        min_score,
        days_back = window.days_back(),
        "pipeline run complete"
    );

    PipelineRun { status, envelope }
}
