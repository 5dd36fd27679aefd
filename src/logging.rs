//! File logging.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a daily
//! rolling `encore.log` through a non-blocking writer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_state_dir};

/// Directory the log file is written to.
pub fn log_dir(settings: &LoggingSettings) -> PathBuf {
    settings
        .directory
        .clone()
        .or_else(default_state_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `RUST_LOG` when set and valid, otherwise the configured directive.
fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive for the
/// whole run or buffered lines are lost.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard> {
    let dir = log_dir(settings);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(&dir, "encore.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter(settings))
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directory_wins() {
        let settings = LoggingSettings {
            directory: Some(PathBuf::from("/tmp/encore-logs")),
            ..LoggingSettings::default()
        };
        assert_eq!(log_dir(&settings), PathBuf::from("/tmp/encore-logs"));
    }
}
