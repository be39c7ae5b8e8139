//! Health check and hello endpoints
//!
//! `/healthz` is what liveness/readiness probes hit, so it must answer
//! quickly and never keep a connection checked out.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Hello response
#[derive(Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
}

/// GET /healthz - `SELECT 1` against the database
async fn healthz(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    match state.store().ping().await {
        Ok(()) => Ok(Json(HealthResponse { status: "ok" })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            Err(ApiError::Unavailable("db not ready"))
        }
    }
}

/// GET /hello
async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "hello from FastAPI",
    })
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/hello", get(hello))
}
