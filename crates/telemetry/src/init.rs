// Path: crates/telemetry/src/init.rs
use mno_types::config::TelemetryConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initializes the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_filter`. Output goes to stderr
/// as JSON lines when `config.json` is set, human-readable text otherwise, so
/// stdout stays reserved for command results. Records emitted through the
/// `log` facade are forwarded into `tracing`.
///
/// Once a global subscriber is installed, later calls are no-ops.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), anyhow::Error> {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!(target: "telemetry", "global subscriber already installed");
        return Ok(());
    }
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &config.log_filter)?;

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
    });
    let text_layer = (!config.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
    });

    let subscriber = Registry::default()
        .with(filter)
        .with(json_layer)
        .with(text_layer);
    if let Err(e) = tracing_log::LogTracer::init() {
        // Another component owns the `log` facade; keep its logger.
        tracing::debug!(target: "telemetry", error = %e, "log bridge not installed");
    }
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_filter(rust_log: Option<&str>, fallback: &str) -> Result<EnvFilter, anyhow::Error> {
    let directives = match rust_log {
        Some(d) if !d.trim().is_empty() => d,
        _ => fallback,
    };
    Ok(EnvFilter::try_new(directives)?)
}
