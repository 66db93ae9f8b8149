use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_FILE_PREFIX: &str = "papersum-tui.log";

/// `<cache_dir>/papersum/logs`, falling back to `./logs`.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("papersum").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Route `tracing` output to a daily rolling file.
///
/// The terminal belongs to the UI, so nothing is written to stdout/stderr.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init() -> anyhow::Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
