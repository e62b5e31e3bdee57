//! Logging setup
//!
//! The broker reads our stdout as its reply, so logs go to a file instead.
//! `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Filter used when RUST_LOG is not set
const DEFAULT_FILTER: &str = "p4access=info";

/// Send logs to the configured file, appending
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging(config: &Config) -> Result<WorkerGuard> {
    let (dir, file) = split_log_path(&config.log_file)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(guard)
}

/// Log to the configured file, or to stderr when it cannot be opened
///
/// Never fails: an unwritable log path must not stop the broker reply.
pub fn init_logging_or_stderr(config: &Config) -> Option<WorkerGuard> {
    match init_logging(config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
            // Fails only if a subscriber is already installed, which is fine
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .try_init();
            tracing::warn!("Logging to stderr: {:#}", e);
            None
        }
    }
}

/// Directory and file name of a log path; a bare name lives in the cwd
fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file = path
        .file_name()
        .with_context(|| format!("Log path {} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file))
}
