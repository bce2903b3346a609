//! File logging. The terminal belongs to the TUI, so logs go to a daily
//! rolling file under the data directory.

use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::db;

const LOG_FILE_PREFIX: &str = "swarna.log";

/// `$SWARNA_LOG_PATH`, else `<data dir>/swarna/logs`
pub fn log_dir() -> Result<PathBuf> {
  match std::env::var_os("SWARNA_LOG_PATH") {
    Some(path) => Ok(PathBuf::from(path)),
    None => Ok(db::data_dir()?.join("logs")),
  }
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
  let dir = log_dir()?;
  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
  let (writer, guard) = tracing_appender::non_blocking(file_appender);

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_target(true)
    .with_ansi(false)
    .with_writer(writer)
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

  Ok(guard)
}
