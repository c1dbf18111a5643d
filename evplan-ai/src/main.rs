//! evplan-ai - Event planning function server
//!
//! Serves the function registry over HTTP:
//! - `GET /health`, `GET /build-info`
//! - `GET /functions`, `GET /functions/:name`
//! - `POST /functions/:name`

use anyhow::{Context, Result};
use clap::Parser;
use evplan_ai::api::health::BuildInfo;
use evplan_ai::AppState;
use evplan_common::config::CliOverrides;
use evplan_common::logging::init_tracing;
use evplan_common::Settings;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;

/// Command-line arguments for evplan-ai
#[derive(Parser, Debug)]
#[command(name = "evplan-ai")]
#[command(about = "Event planning function server")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5780
    #[arg(short, long)]
    bind: Option<String>,

    /// Completion endpoint base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Model name sent with each completion request
    #[arg(long)]
    model: Option<String>,

    /// Path to the SQLite record store
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Completion request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            base_url: self.base_url.clone(),
            api_key: None,
            model_name: self.model.clone(),
            db_path: self.db_path.clone(),
            timeout_secs: self.timeout_secs,
            bind: self.bind.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let settings = Settings::resolve(&args.overrides()).context("Failed to resolve settings")?;

    init_tracing(&settings.log_level);

    let build = BuildInfo::current();
    info!("Starting evplan-ai (event planning functions)");
    info!(
        "Version: {} ({}, built {}, {})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );
    info!("Completion endpoint: {}", settings.llm.base_url);
    info!("Model: {}", settings.llm.model_name);
    info!("Database: {}", settings.db_path.display());
    if !settings.db_path.exists() {
        tracing::warn!(
            "Database file not found; run `evplan-db init --seed` first. \
             Lookups will return no rows."
        );
    }

    let state = AppState::from_settings(&settings).context("Failed to create completion client")?;
    for name in state.registry.names() {
        info!("Registered function: {}", name);
    }

    let app = evplan_ai::build_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", settings.server.bind))?;

    info!("Listening on http://{}", settings.server.bind);
    info!("Health check: http://{}/health", settings.server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
            info!("Received terminate signal, shutting down");
        },
    }
}
