//! HTTP server command
//!
//! Connects to Postgres, creates the schema (retrying while the database
//! comes up), then serves the todo API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use todoctl_server::db::{ensure_schema_with_retry, Database, RetryPolicy};
use todoctl_server::http::{run_server, ServerConfig};
use todoctl_server::AppState;

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Schema creation attempts before giving up at startup
    #[arg(long, env = "STARTUP_MAX_ATTEMPTS", default_value_t = 15)]
    pub startup_max_attempts: u32,

    /// Seconds between schema creation attempts
    #[arg(long, env = "STARTUP_RETRY_DELAY_SECS", default_value_t = 2)]
    pub startup_retry_delay_secs: u64,

    /// Allow any CORS origin (pass `false` for same-origin only)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub cors_permissive: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl ServeArgs {
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.startup_max_attempts,
            delay: Duration::from_secs(self.startup_retry_delay_secs),
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(database = %args.db.describe(), "Starting todoctl server on {}", args.bind);

    let db = Database::connect_lazy(args.db.connect_options()?, &args.db.pool_config());

    ensure_schema_with_retry(&db, args.retry_policy())
        .await
        .context("Database never became ready")?;

    // Run server (blocks until shutdown)
    let result = run_server(AppState::new(db.clone()), args.server_config())
        .await
        .context("Server error");

    db.close().await;
    result
}
