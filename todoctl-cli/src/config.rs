//! Configuration: `.env` loading and database connection arguments

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use todoctl_server::db::{PgConnectOptions, PoolConfig};

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.todoctl/.env
///
/// Runs before tracing is initialized, so it reports what it loaded
/// instead of logging.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        // dotenvy doesn't overwrite existing vars, so this is safe
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Get the todoctl config directory path (~/.todoctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todoctl"))
}

/// Database connection arguments, shared by every subcommand that talks
/// to Postgres.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full connection URL; overrides the individual DB_* settings
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "appuser")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "apppass", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "appdb")]
    pub db_name: String,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Maximum number of pooled connections
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, default_value_t = 5)]
    pub acquire_timeout_secs: u64,
}

impl DatabaseArgs {
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid postgres URL");
        }

        Ok(PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name))
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }

    /// Host/port/db for log lines, without credentials.
    pub fn describe(&self) -> String {
        match &self.database_url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("{}:{}/{}", self.db_host, self.db_port, self.db_name),
        }
    }
}
