//! Trade Journal — Entry Point
//!
//! Wiring sequence:
//! 1. Load config.toml (or defaults) + env overrides + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the trade document (created as `[]` on first start)
//! 4. Build the trade service and Prometheus registry
//! 5. Serve the API + front-end until SIGINT, then drain and exit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trade_journal::adapters::http::{self, AppState};
use trade_journal::adapters::monitoring::MetricsRegistry;
use trade_journal::adapters::persistence::JsonFileRepository;
use trade_journal::config::loader::{self, CONFIG_PATH_ENV};
use trade_journal::config::{LogFormat, LoggingConfig};
use trade_journal::ports::repository::TradeRepository;
use trade_journal::usecases::TradeService;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let config_found = loader::config_file_exists(&config_path);
    let config = loader::load_config(&config_path).context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    init_tracing(&config.logging);

    if !config_found {
        warn!(config = %config_path, "Config file not found, using defaults");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        data_file = %config.storage.data_file,
        static_dir = %config.web.static_dir,
        "Starting trade journal"
    );

    // ── 3. Open the trade document ──────────────────────────
    let repository: Arc<dyn TradeRepository> = Arc::new(
        JsonFileRepository::open(&config.storage.data_file)
            .await
            .context("Failed to initialize trade document")?,
    );

    // ── 4. Service + metrics ────────────────────────────────
    let service = Arc::new(TradeService::new(repository));
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to register metrics")?);
    let app = http::router(AppState::new(service, metrics), &config.web);

    // ── 5. Serve until SIGINT ───────────────────────────────
    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "Server listening");
    info!(url = %format!("http://localhost:{}/api/trades", config.server.port), "API available");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).pretty().init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for SIGINT");
        std::future::pending::<()>().await;
    }
    info!("SIGINT received, initiating graceful shutdown");
}
