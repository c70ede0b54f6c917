//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout is left to the
//! colored progress output and to `--dry-run` documents.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the CLI.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: u8) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose > 1)
                .with_level(true),
        )
        .try_init()
}
