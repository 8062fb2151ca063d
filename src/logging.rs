use anyhow::{Result, anyhow};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Send tracing output to `<dir>/clipvault.log`. The terminal belongs to the
/// TUI, so nothing is written to stderr.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(dir: &Path, filter: &str) -> Result<WorkerGuard> {
  std::fs::create_dir_all(dir).map_err(|e| anyhow!("Failed to create log directory {}: {}", dir.display(), e))?;
  let appender = tracing_appender::rolling::never(dir, "clipvault.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let env_filter = EnvFilter::try_new(filter).map_err(|e| anyhow!("Invalid log filter '{}': {}", filter, e))?;

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

  Ok(guard)
}
