//! AC3 Monitor: EU AI Act Article 4 (AI literacy) regulation monitor.
//!
//! This crate serves the `ac3-eurlex` relevance pipeline over HTTP:
//! EUR-Lex source → normalize → score → categorize → filter/rank → JSON
//!
//! # Architecture
//!
//! - **Config**: one [`MonitorConfig`] loaded from TOML at startup
//! - **Source**: SPARQL endpoint or RSS feed, selected by `source.kind`
//! - **Server**: axum router with request logging, see [`server`]

pub mod config;
pub mod error;
pub mod server;

pub use config::{MonitorConfig, PipelineConfig, ServerConfig, SourceFailurePolicy};
pub use error::{MonitorError, Result};
pub use server::ApiServer;
