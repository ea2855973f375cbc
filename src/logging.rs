//! Logging setup for the command-line front end.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize structured logging on stderr.
///
/// Stdout is reserved for rendered HTML. Call once at startup; later calls
/// are ignored.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "pco_embed=debug" } else { DEFAULT_FILTER })
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    tracing::debug!("Logging initialized");
}
