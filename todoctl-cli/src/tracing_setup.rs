//! Log output for the todoctl binary
//!
//! Console logging is always installed. `--otel` adds OTLP span export on
//! builds with the `telemetry` feature; if the exporter cannot be set up the
//! binary keeps console logging and says why.
//!
//! Environment variables:
//!   RUST_LOG                          # Log filter (default: info, or debug with --debug)
//!   OTEL_EXPORTER_OTLP_ENDPOINT       # OTLP endpoint (default: http://localhost:4317)
//!   OTEL_SERVICE_NAME                 # Service name (default: todoctl)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Default filter becomes `debug` when RUST_LOG is unset
    pub debug: bool,
    /// Export spans over OTLP as well
    pub otel: bool,
}

/// Which subscriber ended up installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Console,
    Otlp,
}

fn env_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    let default = if debug { "debug" } else { "info" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

fn filter_from_env(config: &TracingConfig) -> EnvFilter {
    env_filter(config.debug, std::env::var("RUST_LOG").ok().as_deref())
}

fn init_console(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env(config))
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(feature = "telemetry")]
fn init_otlp(config: &TracingConfig) -> Result<()> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::TracerProvider;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());
    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "todoctl".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .map_err(|e| anyhow!("cannot build OTLP exporter for {endpoint}: {e}"))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(opentelemetry_sdk::Resource::new(vec![
            KeyValue::new("service.name", service_name.clone()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]))
        .build();

    let spans = tracing_opentelemetry::layer().with_tracer(provider.tracer("todoctl"));

    tracing_subscriber::registry()
        .with(filter_from_env(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(config.debug)
                .compact(),
        )
        .with(spans)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    // Dropping the provider stops export; keep it global.
    let _ = opentelemetry::global::set_tracer_provider(provider);

    tracing::info!(endpoint = %endpoint, service = %service_name, "OTLP span export enabled");
    Ok(())
}

#[cfg(not(feature = "telemetry"))]
fn init_otlp(_config: &TracingConfig) -> Result<()> {
    Err(anyhow!("todoctl was built without the `telemetry` feature"))
}

/// Flush pending spans.
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

/// Try `otlp` first, fall back to console logging if it fails.
fn init_preferring<F>(config: &TracingConfig, otlp: F) -> Result<Backend>
where
    F: FnOnce(&TracingConfig) -> Result<()>,
{
    match otlp(config) {
        Ok(()) => Ok(Backend::Otlp),
        Err(err) => {
            init_console(config)?;
            let cause = format!("{err:#}");
            tracing::warn!(error = %cause, "OTLP export unavailable, logging to console only");
            Ok(Backend::Console)
        }
    }
}

/// Install the global subscriber.
pub fn init(config: &TracingConfig) -> Result<Backend> {
    if config.otel {
        init_preferring(config, init_otlp)
    } else {
        init_console(config).map(|()| Backend::Console)
    }
}
