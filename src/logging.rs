//! File logging. The terminal belongs to the board, so nothing is logged to stdout/stderr.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Environment variable overriding `log_level` from the config
pub const LOG_ENV: &str = "TASKBOARD_LOG";

/// Log file name prefix inside the data directory
const LOG_FILE_PREFIX: &str = "taskboard.log";

/// Build the filter: TASKBOARD_LOG wins, then the configured level.
pub fn build_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a daily-rolling file subscriber under the data directory.
/// Returns `None` (logging disabled) when there is no data directory.
/// The guard must outlive the app or buffered lines are lost.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>> {
    let Ok(dir) = Config::data_dir() else {
        return Ok(None);
    };
    init_in(config, &dir).map(Some)
}

/// Install the file subscriber writing into `dir`.
/// Fails if the directory cannot be created or a global subscriber is already set.
pub fn init_in(config: &Config, dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {:?}", dir))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
