//! API error types with IntoResponse
//!
//! Every error renders as `{"detail": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body or path could not be decoded (422)
    Validation(String),

    /// Referenced todo does not exist (404)
    NotFound,

    /// Storage failed mid-request (500, logged)
    Database(DbError),

    /// Dependency not ready, used by health probes (503)
    Unavailable(&'static str),

    /// Request rejected before decoding, with axum's own status (e.g. 413)
    Rejected { status: StatusCode, detail: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Validation(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason),
            Self::NotFound => (StatusCode::NOT_FOUND, "Not found".to_owned()),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_owned(),
                )
            }
            Self::Unavailable(reason) => (StatusCode::SERVICE_UNAVAILABLE, reason.to_owned()),
            Self::Rejected { status, detail } => (status, detail),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
