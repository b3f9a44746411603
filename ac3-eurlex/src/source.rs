//! Trait definition for interchangeable document sources.
//!
//! The SPARQL endpoint and the RSS feed are alternate strategies feeding the
//! same pipeline. Each implements [`DocumentSource`] and is selected once at
//! startup from [`FetchConfig::kind`](crate::FetchConfig::kind).

use crate::error::FetchError;
use crate::pipeline::scoring::ScoringProfile;
use crate::query::LookbackWindow;
use crate::types::{RawRecord, SourceKind};

/// A remote source of EUR-Lex document metadata.
///
/// Implementors make exactly one outbound request per [`fetch`](Self::fetch)
/// call and never retry. Every transport, status or payload problem is
/// reported as a [`FetchError`], so an empty `Ok` always means the source
/// genuinely had nothing in the window.
pub trait DocumentSource: Send + Sync {
    /// Fetch the raw records published inside `window`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails, times out, answers with a
    /// non-success status, or the payload cannot be parsed.
    fn fetch(
        &self,
        window: &LookbackWindow,
    ) -> impl std::future::Future<Output = Result<Vec<RawRecord>, FetchError>> + Send;

    /// Which [`SourceKind`] this implementation represents.
    fn kind(&self) -> SourceKind;

    /// Provenance label reported in the response envelope.
    fn label(&self) -> &str {
        self.kind().name()
    }

    /// Rule table matching the text this source produces.
    fn scoring_profile(&self) -> ScoringProfile {
        ScoringProfile::for_source(self.kind())
    }

    /// The query text sent for `window`, if the source builds one.
    fn describe_query(&self, _window: &LookbackWindow) -> Option<String> {
        None
    }
}
