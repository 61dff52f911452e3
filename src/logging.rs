//! Logging setup for the command-line tool.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the binary.

use std::path::Path;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, SmsBackupError};

/// File name prefix of the daily log files (`app.log.YYYY-MM-DD`).
pub const LOG_FILE_PREFIX: &str = "app.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. Console output goes to
/// stderr. With `log_dir`, events are also written to a daily-rolling file
/// in that directory; keep the returned guard alive until exit so buffered
/// lines are flushed.
pub fn init_logging(log_level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| SmsBackupError::logging(format!("invalid log filter: {e}")))?;

    let registry = Registry::default().with(env_filter);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let guard = if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        let (writer, guard) = non_blocking(rolling::daily(dir, LOG_FILE_PREFIX));
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true);

        registry
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| SmsBackupError::logging(e.to_string()))?;
        Some(guard)
    } else {
        registry
            .with(console_layer)
            .try_init()
            .map_err(|e| SmsBackupError::logging(e.to_string()))?;
        None
    };

    info!("logging initialized");
    Ok(guard)
}
