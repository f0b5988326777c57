//! Health Checks - Liveness and Readiness Probes
//!
//! `/api/live` answers while the process runs; `/api/ready` also
//! requires the trade document to be reachable.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::adapters::http::AppState;

/// Probe routes, to be merged into the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/live", get(liveness))
        .route("/api/ready", get(readiness))
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe: returns 200 only if the trade document is reachable.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.service.is_healthy().await {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}
