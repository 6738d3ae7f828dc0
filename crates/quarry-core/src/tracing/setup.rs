//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "QUARRY_LOG";

/// Initialize the Quarry tracing/logging system.
///
/// Reads `QUARRY_LOG` for per-crate log levels, e.g.
/// `QUARRY_LOG=quarry_mining=debug,quarry_storage=warn`.
///
/// Falls back to `quarry=info` if `QUARRY_LOG` is not set or is invalid.
/// Logs go to stderr so stdout stays free for command output.
///
/// Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("quarry=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
