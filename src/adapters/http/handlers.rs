//! Journal API handlers.
//!
//! GET    /api/trades        list
//! POST   /api/trades        create (201)
//! PUT    /api/trades/:id    merge update (404 if unknown)
//! DELETE /api/trades/:id    delete (always `{success: true}`)
//! GET    /api/metrics       summary statistics
//! GET    /api/export        `trades-backup.json` attachment
//! POST   /api/import        replace collection (400 unless an array)

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde_json::{Map, Value, json};
use tracing::error;

use super::{ApiError, AppState};
use crate::domain::metrics::TradeMetrics;
use crate::domain::trade::Trade;
use crate::usecases::{EXPORT_FILENAME, TradeError};

type ApiResult<T> = Result<T, ApiError>;

/// Request body as a JSON object, or a 400.
fn object_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Map<String, Value>> {
    let Json(value) = body?;
    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(TradeError::InvalidInput("Trade body must be a JSON object".to_string()).into()),
    }
}

pub async fn list_trades(State(state): State<AppState>) -> ApiResult<Json<Vec<Trade>>> {
    let started = Instant::now();
    let result = state.service.list().await;
    state.metrics.observe("list", started, &result);

    let trades = result?;
    state.metrics.set_trades_stored(trades.len());
    Ok(Json(trades))
}

pub async fn create_trade(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Trade>)> {
    let fields = object_body(body)?;

    let started = Instant::now();
    let result = state.service.create(fields).await;
    state.metrics.observe("create", started, &result);

    let (trade, total) = result?;
    state.metrics.set_trades_stored(total);
    Ok((StatusCode::CREATED, Json(trade)))
}

pub async fn update_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Trade>> {
    let patch = object_body(body)?;

    let started = Instant::now();
    let result = state.service.update(&id, patch).await;
    state.metrics.observe("update", started, &result);

    Ok(Json(result?))
}

pub async fn delete_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let started = Instant::now();
    let result = state.service.delete(&id).await;
    state.metrics.observe("delete", started, &result);

    let deletion = result?;
    state.metrics.set_trades_stored(deletion.remaining);
    Ok(Json(json!({ "success": true })))
}

pub async fn trade_metrics(State(state): State<AppState>) -> ApiResult<Json<TradeMetrics>> {
    let started = Instant::now();
    let result = state.service.metrics().await;
    state.metrics.observe("metrics", started, &result);

    let metrics = result?;
    state.metrics.set_trades_stored(metrics.total_trades);
    Ok(Json(metrics))
}

pub async fn export_trades(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let started = Instant::now();
    let result = state.service.export().await;
    state.metrics.observe("export", started, &result);

    let body = result?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILENAME}"),
            ),
        ],
        body,
    ))
}

pub async fn import_trades(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(payload) = body?;

    let started = Instant::now();
    let result = state.service.import(payload).await;
    state.metrics.observe("import", started, &result);

    let count = result?;
    state.metrics.set_trades_stored(count);
    Ok(Json(json!({ "success": true, "count": count })))
}

pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.render() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => {
            error!(error = %e, "Failed to render Prometheus metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
        }
    }
}
