//! Tracing setup.
//!
//! The TUI owns the terminal, so logs go to `flap.log` instead of
//! stdout/stderr. Logging is off unless `FLAP_LOG` is set to a tracing
//! filter (e.g. `FLAP_LOG=flap_core=debug`).

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file written next to the working directory.
const LOG_FILE: &str = "flap.log";

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "FLAP_LOG";

/// Initializes file logging when `FLAP_LOG` is set.
///
/// Returns the appender guard; dropping it flushes buffered log lines,
/// so the caller must keep it alive for the process lifetime.
pub fn init() -> Option<WorkerGuard> {
    let filter = std::env::var(LOG_ENV).ok()?;

    let appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
