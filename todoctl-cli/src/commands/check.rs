//! One-shot database reachability probe
//!
//! `todoctl check` runs `SELECT 1` and exits 0 on success, non-zero
//! otherwise. Usable as an exec probe or an init-container gate.

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::db::Database;

use crate::config::DatabaseArgs;

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Ping the database once
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let db = Database::connect_lazy(args.db.connect_options()?, &args.db.pool_config());

    let result = db
        .ping()
        .await
        .with_context(|| format!("Database {} not ready", args.db.describe()));
    db.close().await;
    result?;

    tracing::info!(database = %args.db.describe(), "Database reachable");
    println!("ok");
    Ok(())
}
