//! HTTP error mapping.
//!
//! Storage failures become a generic 500; `NotFound` and `InvalidInput`
//! keep their own status codes. The body is always `{"error": "..."}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::usecases::TradeError;

/// Error returned by every API handler.
#[derive(Debug)]
pub struct ApiError(pub TradeError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TradeError::NotFound(_) => StatusCode::NOT_FOUND,
            TradeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TradeError::StorageRead(_) | TradeError::StorageWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TradeError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
