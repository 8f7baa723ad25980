//! Logging setup
//!
//! Diagnostics go to stderr as human-readable text; stdout carries only
//! the one-line run summary. The filter comes from `--log-level`, then
//! `--verbose`, and `RUST_LOG` overrides both.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
pub fn init(verbose: bool, log_level: Option<&str>) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let directive = log_level.unwrap_or(default_level);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {}", e))?;

    Ok(())
}
