//! File-based tracing setup.
//!
//! The terminal is owned by the alternate screen, so events go to
//! `~/.local/state/circuit/circuit.log` instead of stdout. Set `CIRCUIT_LOG`
//! to an env-filter directive (e.g. `circuit=debug`) to change the level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_dirs::AppDirs;

const LOG_FILE: &str = "circuit.log";
const FILTER_ENV: &str = "CIRCUIT_LOG";

/// Install the global subscriber.
///
/// Returns a `WorkerGuard` that must be held until exit so buffered lines are
/// flushed. Returns `None` (logging disabled) when no log directory can be
/// created.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = AppDirs::log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
        return None;
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::info!(log_file = ?log_dir.join(LOG_FILE), "circuit logging initialized");
    Some(guard)
}
