//! Diagnostic logging setup for the command line tool

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Pick the default filter directive for the given flags
///
/// `--verbose` wins over `--quiet` when both are given.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Initialize a tracing subscriber writing to stderr
///
/// The `RUST_LOG` environment variable takes precedence over the flags.
/// Stdout is reserved for the formatted report.
pub fn init(verbose: bool, quiet: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose, quiet)))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
