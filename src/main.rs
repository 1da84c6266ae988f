//! Time Attendance Engine server.
//!
//! Loads `attendance.yaml`, seeds the in-memory punch and work update sources
//! and serves the HTTP API until interrupted.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::source::{InMemoryPunchSource, InMemoryWorkUpdateSource, PunchSource};
use attendance_engine::telemetry::init_tracing_from_env;

/// Environment variable naming the configuration directory.
const CONFIG_DIR_ENV: &str = "ATTENDANCE_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_from_env();

    info!("Starting Time Attendance Engine v{}", env!("CARGO_PKG_VERSION"));

    let config_dir = std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("Failed to load configuration from {}", config_dir.display()))?;

    info!(
        config_dir = %config_dir.display(),
        week_start = ?config.week_start(),
        utc_offset = %config.utc_offset(),
        fetch_timeout_ms = config.fetch_timeout().as_millis(),
        "Loaded configuration"
    );

    let source = match config.seed_file_path() {
        Some(path) => InMemoryPunchSource::load_json(&path)
            .with_context(|| format!("Failed to load seed punches from {}", path.display()))?,
        None => InMemoryPunchSource::new(),
    };
    if source.is_empty().await {
        warn!("Punch source starts empty");
    } else {
        info!(punches = source.len().await, "Punch source seeded");
    }
    let source: Arc<dyn PunchSource> = Arc::new(source);

    let work_updates = match config.work_updates_file_path() {
        Some(path) => InMemoryWorkUpdateSource::load_json(&path).with_context(|| {
            format!("Failed to load seed work updates from {}", path.display())
        })?,
        None => InMemoryWorkUpdateSource::new(),
    };

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .context("Invalid server address")?;

    let state = AppState::new(config, source).with_work_updates(Arc::new(work_updates));
    let app = create_router(state);

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
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
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
