//! Database connection pool management
//!
//! Uses a lazily-connecting sqlx `PgPool` so the process can start before
//! Postgres is reachable; the first real acquisition happens in
//! [`ensure_schema_with_retry`].

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres};

use super::{schema, DbError};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing and timeouts.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Handle to the connection pool.
///
/// Cheap to clone; every clone shares the same pool. Constructed once at
/// startup and closed explicitly with [`Database::close`] at shutdown.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build a pool without opening any connection yet.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn connect_lazy(options: PgConnectOptions, config: &PoolConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .test_before_acquire(true)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Take one connection out of the pool.
    ///
    /// The connection goes back to the pool when the returned guard is
    /// dropped, whichever way the caller exits.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, DbError> {
        self.pool.acquire().await.map_err(DbError::Connection)
    }

    /// Run `SELECT 1` on a fresh connection.
    pub async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    /// Close every connection and refuse new acquisitions.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// Fixed-delay, bounded retry for startup work.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Zero is treated as one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 15,
            delay: Duration::from_secs(2),
        }
    }
}

/// Create the schema, retrying on any failure until the policy is spent.
///
/// Returns the last error once every attempt has failed; callers treat
/// that as fatal.
pub async fn ensure_schema_with_retry(db: &Database, policy: RetryPolicy) -> Result<(), DbError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match schema::ensure_schema(db).await {
            Ok(()) => {
                tracing::info!(attempt, "Database schema ready");
                return Ok(());
            }
            Err(err) if attempt >= max_attempts => {
                tracing::error!(attempt, error = %err, "Database still unavailable, giving up");
                return Err(err);
            }
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %err,
                    "Database not ready, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A pool pointed at a port nothing listens on.
    pub(crate) fn unreachable_database() -> Database {
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .password("nothing")
            .database("nowhere");
        let config = PoolConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_millis(250),
        };
        Database::connect_lazy(options, &config)
    }

    #[test]
    fn default_policy_matches_startup_budget() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 15);
        assert_eq!(policy.delay, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn ping_fails_when_unreachable() {
        let db = unreachable_database();
        let err = db.ping().await.unwrap_err();
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[tokio::test]
    async fn retry_gives_up_after_max_attempts() {
        let db = unreachable_database();
        let policy = RetryPolicy {
            max_attempts: 2,
            delay: Duration::from_millis(10),
        };

        let err = ensure_schema_with_retry(&db, policy).await.unwrap_err();
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let db = unreachable_database();
        let policy = RetryPolicy {
            max_attempts: 0,
            delay: Duration::from_secs(3600),
        };

        // Would hang for an hour if a retry were scheduled.
        let result = tokio::time::timeout(
            Duration::from_secs(30),
            ensure_schema_with_retry(&db, policy),
        )
        .await;
        assert!(matches!(result, Ok(Err(DbError::Connection(_)))));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p todoctl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_succeeds_against_real_database() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        let db = Database::connect_lazy(options, &PoolConfig::default());

        db.ping().await.expect("ping failed");
        ensure_schema_with_retry(&db, RetryPolicy::default())
            .await
            .expect("schema creation failed");
        db.close().await;
    }
}
