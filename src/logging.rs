//! Diagnostic logging setup for the CLI.
//!
//! Diagnostics (missing paths, unknown conditions, classifier calls) are
//! written to stderr so they never mix with `-l`/`-j` output.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `debug` or
/// `rifleman=debug`.
pub const LOG_ENV: &str = "RIFLEMAN_LOG";

/// Level used when neither `RIFLEMAN_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the effective filter. `RIFLEMAN_LOG` wins over `RUST_LOG`; a
/// `verbose` run raises the default to `debug`.
pub fn env_filter(verbose: bool) -> EnvFilter {
    for var in [LOG_ENV, "RUST_LOG"] {
        if let Ok(value) = std::env::var(var) {
            if let Ok(filter) = EnvFilter::try_new(&value) {
                return filter;
            }
        }
    }

    EnvFilter::new(if verbose { "debug" } else { DEFAULT_LEVEL })
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbose: bool) {
    let _ = fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
