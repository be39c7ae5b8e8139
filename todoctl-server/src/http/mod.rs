//! HTTP server layer
//!
//! Axum server with:
//! - CORS (permissive by default, this is a demo service)
//! - Request tracing and a per-request timeout
//! - Graceful shutdown
//! - `{"detail": ...}` JSON error bodies

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
