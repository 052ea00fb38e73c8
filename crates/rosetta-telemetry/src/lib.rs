//! Logging setup for rosetta
//!
//! Installs a `tracing-subscriber` registry writing to stderr, so that
//! stdout stays reserved for converted payloads.

use rosetta_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the configured directive parses
const FALLBACK_FILTER: &str = "info";

/// Initialize logging from configuration
///
/// `RUST_LOG` takes precedence over the configured filter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = build_filter(&config.filter);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

/// Resolve the active filter: `RUST_LOG`, then `configured`, then `info`
fn build_filter(configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::try_new(configured).unwrap_or_else(|e| {
        eprintln!("invalid log filter `{configured}`, using `{FALLBACK_FILTER}`: {e}");
        EnvFilter::new(FALLBACK_FILTER)
    })
}
