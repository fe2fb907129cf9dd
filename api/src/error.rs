//! Maps [`CatalogError`] onto HTTP responses.
//!
//! Every error body carries an `error` message; validation errors add the
//! offending `field` and position errors add the `total_count`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quotes_common::CatalogError;
use serde_json::{Value, json};
use tracing::error;

#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CatalogError::NotFound { .. } | CatalogError::KeyNotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::InvalidParameter { .. }
            | CatalogError::PositionOutOfRange { .. }
            | CatalogError::InvalidPageSize
            | CatalogError::Validation { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Conflict { .. } => StatusCode::CONFLICT,
            CatalogError::Io(_) | CatalogError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match &self.0 {
            CatalogError::PositionOutOfRange { total_count } => json!({
                "error": self.0.to_string(),
                "total_count": total_count,
            }),
            CatalogError::Validation { field, message } => json!({
                "error": message,
                "field": field,
            }),
            CatalogError::Conflict { field, .. } => json!({
                "error": self.0.to_string(),
                "field": field,
            }),
            CatalogError::NotFound { .. } | CatalogError::KeyNotFound { .. } => json!({
                "error": "Not found.",
            }),
            CatalogError::Io(_) | CatalogError::Snapshot(_) => json!({
                "error": "Internal server error",
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, Json(self.body())).into_response()
    }
}

/// Turns a JSON request body into a draft, reporting shape errors as 400s.
pub fn decode<D: serde::de::DeserializeOwned>(body: Value) -> Result<D, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError(CatalogError::validation("non_field_errors", e.to_string())))
}
