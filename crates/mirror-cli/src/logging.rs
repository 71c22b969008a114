//! Diagnostic logging setup
//!
//! Activity log lines go to stdout through the activity log's console sink;
//! `tracing` diagnostics go to stderr so the two never interleave on one
//! stream.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    tracing::debug!("Verbose mode enabled");
    Ok(())
}
