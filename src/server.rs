//! HTTP API over the EUR-Lex relevance pipeline.
//!
//! ## Endpoints
//!
//! - `GET /api/eu-regulations?since=&minScore=`: scored, filtered, ranked documents
//! - `GET /health`: liveness and the configured source
//! - `GET /api/test-query?since=`: the SPARQL query that would be sent

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use ac3_eurlex::pipeline::parse_min_score;
use ac3_eurlex::{
    DocumentSource, ErrorEnvelope, LookbackWindow, Source, SourceStatus, run_pipeline,
};
use axum::Router;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::{MonitorConfig, SourceFailurePolicy};
use crate::error::{MonitorError, Result};

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "ac3-monitor";

// ---------------------------------------------------------------------------
// Request and response types
// ---------------------------------------------------------------------------

/// Name of the lookback parameter.
pub const SINCE_PARAM: &str = "since";

/// Name of the score threshold parameter.
pub const MIN_SCORE_PARAM: &str = "minScore";

/// Raw query-string pairs.
///
/// Values stay raw and repeated keys are kept, so that bad or duplicated
/// input falls back to defaults instead of being rejected. The first
/// occurrence of a key wins.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// First value given for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: String,
    pub source: String,
}

/// Response from `GET /api/test-query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQueryResponse {
    pub success: bool,
    pub query: String,
    pub cutoff: String,
    pub days_back: u32,
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers. Immutable after startup.
#[derive(Clone)]
struct AppState {
    config: Arc<MonitorConfig>,
    source: Arc<Source>,
}

/// Build the API router for `config` and an already constructed `source`.
pub fn router(config: MonitorConfig, source: Source) -> Router {
    let state = AppState {
        config: Arc::new(config),
        source: Arc::new(source),
    };

    Router::new()
        .route("/api/eu-regulations", get(handle_regulations))
        .route("/health", get(handle_health))
        .route("/api/test-query", get(handle_test_query))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// ApiServer
// ---------------------------------------------------------------------------

/// The monitor's HTTP server, serving in a background tokio task.
pub struct ApiServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Validate `config`, build the source and start serving.
    ///
    /// Binds to `{server.host}:{server.port}` (use port `0` for auto-assign).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the source cannot be
    /// built, or the TCP listener cannot bind.
    pub async fn start(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        let source = Source::from_config(&config.source)?;

        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| MonitorError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| MonitorError::Server(format!("failed to get local addr: {e}")))?;

        info!(source = source.label(), "AC3 monitor listening on http://{addr}");

        let app = router(config, source);
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms,
        "request handled"
    );
    response
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /api/eu-regulations`: run the pipeline once.
async fn handle_regulations(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let defaults = &state.config.pipeline;
    let now = Utc::now();
    let window =
        LookbackWindow::from_since(params.first(SINCE_PARAM), defaults.default_since_days, now);
    let min_score = parse_min_score(params.first(MIN_SCORE_PARAM), defaults.default_min_score);

    let run = run_pipeline(state.source.as_ref(), &window, min_score, now).await;

    match (&run.status, defaults.on_source_failure) {
        (SourceStatus::Unavailable(reason), SourceFailurePolicy::BadGateway) => {
            let error = format!("{} unavailable: {reason}", state.source.label());
            (StatusCode::BAD_GATEWAY, Json(ErrorEnvelope::new(error))).into_response()
        }
        _ => Json(run.envelope).into_response(),
    }
}

/// `GET /health`: liveness.
async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_owned(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        source: state.source.label().to_owned(),
    })
}

/// `GET /api/test-query`: show the SPARQL query for a window without sending it.
async fn handle_test_query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let window = LookbackWindow::from_since(
        params.first(SINCE_PARAM),
        state.config.pipeline.default_since_days,
        Utc::now(),
    );

    match state.source.describe_query(&window) {
        Some(query) => Json(TestQueryResponse {
            success: true,
            query,
            cutoff: window.cutoff_string(),
            days_back: window.days_back(),
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorEnvelope::new(format!(
                "{} does not build a query",
                state.source.label()
            ))),
        )
            .into_response(),
    }
}
