//! todoctl - todo CRUD service over PostgreSQL
//!
//! Entry point for the `todoctl` binary:
//! - `serve`: run the HTTP API (creates the schema on startup, retrying
//!   while the database comes up)
//! - `check`: one-shot database reachability probe

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Todo CRUD service over PostgreSQL, built for orchestration smoke tests"
)]
struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check that the database is reachable (exit code 0/1)
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so clap's env fallbacks see .env values.
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    }) {
        eprintln!("failed to initialize logging: {err:#}");
    }

    if env_files.is_empty() {
        tracing::debug!("No .env files found (current dir or ~/.todoctl)");
    } else {
        for path in &env_files {
            tracing::info!("Loaded configuration from {}", path.display());
        }
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Check(args) => commands::run_check(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
