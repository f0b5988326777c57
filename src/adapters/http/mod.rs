//! HTTP Adapter - Journal REST API
//!
//! Thin axum layer over [`TradeService`]: request bodies are parsed to
//! JSON, handed to the service, and the outcome is rendered back. Any
//! path the API does not claim falls through to the front-end assets,
//! ending at the entry document.

pub mod error;
pub mod handlers;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::adapters::monitoring::{MetricsRegistry, health};
use crate::config::WebConfig;
use crate::usecases::TradeService;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The trade store.
    pub service: Arc<TradeService>,
    /// Operation counters.
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub const fn new(service: Arc<TradeService>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { service, metrics }
    }
}

/// Build the full application router.
pub fn router(state: AppState, web: &WebConfig) -> Router {
    let static_dir = Path::new(&web.static_dir);
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(&web.index_file)));

    Router::new()
        .route(
            "/api/trades",
            get(handlers::list_trades).post(handlers::create_trade),
        )
        .route(
            "/api/trades/:id",
            put(handlers::update_trade).delete(handlers::delete_trade),
        )
        .route("/api/metrics", get(handlers::trade_metrics))
        .route("/api/export", get(handlers::export_trades))
        .route("/api/import", post(handlers::import_trades))
        .route("/api/prometheus", get(handlers::prometheus_metrics))
        .merge(health::routes())
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
