//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pooled connection per operation, returned on drop
//! - Every write is a single auto-committed statement
//! - Rows are mapped to domain types by hand, field by field

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{ensure_schema_with_retry, Database, PoolConfig, RetryPolicy};
pub use repos::TodoRepo;
pub use sqlx::postgres::PgConnectOptions;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No connection could be obtained from the pool (database down,
    /// unreachable, or pool exhausted past the acquire timeout).
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Query(#[from] sqlx::Error),
}
