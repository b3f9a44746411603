//! Service configuration, loaded once at startup from TOML.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [source]
//! kind = "sparql"
//!
//! [pipeline]
//! default_since_days = 365
//! default_min_score = 60
//! on_source_failure = "degrade"
//! ```
//!
//! Every section and field is optional; missing values take their defaults.

use std::path::Path;

use ac3_eurlex::{FetchConfig, MAX_SINCE_DAYS};
use ac3_eurlex::pipeline::{DEFAULT_MIN_SCORE, MAX_SCORE};
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub server: ServerConfig,
    pub source: FetchConfig,
    pub pipeline: PipelineConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind (`0` auto-assigns).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
        }
    }
}

/// What the API reports when the source cannot be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFailurePolicy {
    /// 200 with empty results and a `warning`.
    #[default]
    Degrade,
    /// 502 with an error envelope.
    BadGateway,
}

/// Request defaults and failure handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lookback window when `since` is absent or unusable.
    pub default_since_days: u32,
    /// Threshold when `minScore` is absent or unusable.
    pub default_min_score: u8,
    pub on_source_failure: SourceFailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_since_days: ac3_eurlex::DEFAULT_SINCE_DAYS,
            default_min_score: DEFAULT_MIN_SCORE,
            on_source_failure: SourceFailurePolicy::Degrade,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MonitorError::Config(e.to_string()))
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Config`] for out-of-range pipeline defaults and
    /// [`MonitorError::Fetch`] for an invalid source section.
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.default_since_days == 0 {
            return Err(MonitorError::Config(
                "default_since_days must be greater than 0".into(),
            ));
        }
        if self.pipeline.default_since_days > MAX_SINCE_DAYS {
            return Err(MonitorError::Config(format!(
                "default_since_days must be at most {MAX_SINCE_DAYS}"
            )));
        }
        if self.pipeline.default_min_score > MAX_SCORE {
            return Err(MonitorError::Config(format!(
                "default_min_score must be at most {MAX_SCORE}"
            )));
        }
        if self.server.host.trim().is_empty() {
            return Err(MonitorError::Config("server host must not be empty".into()));
        }
        self.source.validate()?;
        Ok(())
    }
}
