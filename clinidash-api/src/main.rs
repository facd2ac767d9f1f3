//! clinidash-api - Clinic dashboard data service
//!
//! Serves dashboard metrics and patient sentiment pages computed from a
//! read-only JSON snapshot. The snapshot is re-read on every request.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clinidash_common::config::{ServiceConfig, TomlConfig, DEFAULT_LOG_LEVEL};
use clinidash_common::DatasetReader;
use clinidash_api::{build_router, AppState, Clock, DashboardService};
use tokio::signal;
use tracing::{error, info, warn};

/// Command-line arguments for clinidash-api
#[derive(Parser, Debug)]
#[command(name = "clinidash-api")]
#[command(about = "Clinic dashboard data service")]
#[command(version)]
struct Args {
    /// Port to listen on (falls back to PORT, then the config file)
    #[arg(short, long, env = "CLINIDASH_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "CLINIDASH_HOST")]
    host: Option<String>,

    /// Dataset snapshot (overrides CLINIDASH_DATA_FILE and the config file)
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// TOML config file (default: <config dir>/clinidash/config.toml)
    #[arg(short, long, env = "CLINIDASH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is loaded before tracing so its log_level can seed the filter;
    // any load error is reported once the subscriber is up
    let loaded = TomlConfig::load_optional(args.config.as_deref());
    let log_level = loaded
        .as_ref()
        .ok()
        .and_then(|config| config.as_ref())
        .and_then(|config| config.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    info!(
        "Starting clinic dashboard service (clinidash-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let toml_config = match loaded {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            warn!("{} - using default configuration", e);
            TomlConfig::default()
        }
    };

    let config = ServiceConfig::resolve(args.data_file.as_deref(), args.host, args.port, toml_config);
    info!("Dataset path: {}", config.data_file.display());
    if !config.data_file.exists() {
        // Not fatal: the file is read per request and may appear later
        warn!(
            "Dataset not found at {} - requests will fail until it exists",
            config.data_file.display()
        );
    }

    let service = DashboardService::new(DatasetReader::new(&config.data_file), Clock::System);
    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!("clinidash-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
