//! Document source implementations.
//!
//! Each module provides a struct implementing [`crate::source::DocumentSource`].
//! [`Source`] picks one of them from configuration and dispatches to it.

pub mod feed;
pub mod sparql;

pub use feed::FeedSource;
pub use sparql::SparqlSource;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::pipeline::scoring::ScoringProfile;
use crate::query::LookbackWindow;
use crate::source::DocumentSource;
use crate::types::{RawRecord, SourceKind};

/// The source selected at startup.
#[derive(Debug, Clone)]
pub enum Source {
    Sparql(SparqlSource),
    Feed(FeedSource),
}

impl Source {
    /// Construct the source named by `config.kind`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Config`] if the configuration is invalid, or
    /// [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        config.validate()?;
        match config.kind {
            SourceKind::Sparql => Ok(Self::Sparql(SparqlSource::new(config)?)),
            SourceKind::Rss => Ok(Self::Feed(FeedSource::new(config)?)),
        }
    }
}

impl DocumentSource for Source {
    async fn fetch(&self, window: &LookbackWindow) -> Result<Vec<RawRecord>, FetchError> {
        match self {
            Self::Sparql(source) => source.fetch(window).await,
            Self::Feed(source) => source.fetch(window).await,
        }
    }

    fn kind(&self) -> SourceKind {
        match self {
            Self::Sparql(source) => source.kind(),
            Self::Feed(source) => source.kind(),
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Sparql(source) => source.label(),
            Self::Feed(source) => source.label(),
        }
    }

    fn scoring_profile(&self) -> ScoringProfile {
        match self {
            Self::Sparql(source) => source.scoring_profile(),
            Self::Feed(source) => source.scoring_profile(),
        }
    }

    fn describe_query(&self, window: &LookbackWindow) -> Option<String> {
        match self {
            Self::Sparql(source) => source.describe_query(window),
            Self::Feed(source) => source.describe_query(window),
        }
    }
}
