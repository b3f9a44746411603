//! AC3 monitor service binary.

use std::path::PathBuf;

use ac3_monitor::{ApiServer, MonitorConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// EU AI Act Article 4 regulation monitor over EUR-Lex.
#[derive(Parser)]
#[command(name = "ac3-monitor", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "AC3_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ac3_monitor=info,ac3_eurlex=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => MonitorConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?,
        None => MonitorConfig::default(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let server = ApiServer::start(config).await.map_err(|e| {
        tracing::error!(error = %e, "ac3-monitor failed to start");
        anyhow::anyhow!("ac3-monitor failed to start: {e}")
    })?;

    tokio::signal::ctrl_c().await?;
    tracing::info!(addr = %server.addr(), "shutting down");
    server.shutdown();
    Ok(())
}
