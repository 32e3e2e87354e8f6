//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "SEMREL_LOG";

/// The filter used when `SEMREL_LOG` is unset.
#[must_use]
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs a stderr subscriber. Later calls are ignored.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
