//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::{LogFormat, LoggingConfig};

/// Where log lines go
enum LogTarget<'a> {
    Stdout,
    /// Daily rolling files under the parent directory of the configured path
    Rolling(&'a Path),
    Append(&'a Path),
}

fn log_target(config: &LoggingConfig) -> LogTarget<'_> {
    match config.file.as_deref().map(str::trim) {
        Some(file) if !file.is_empty() && config.enable_rotation => {
            LogTarget::Rolling(Path::new(file))
        }
        Some(file) if !file.is_empty() => LogTarget::Append(Path::new(file)),
        _ => LogTarget::Stdout,
    }
}

/// Initialize logging system based on configuration
///
/// **Note**: This should be called only once during application startup,
/// after the configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let target = log_target(config);
    let to_console = matches!(target, LogTarget::Stdout);

    let writer: Box<dyn std::io::Write + Send + Sync> = match target {
        LogTarget::Stdout => Box::new(std::io::stdout()),
        LogTarget::Rolling(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let prefix = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("folio.log")
                .trim_end_matches(".log")
                .to_string();
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(config.max_backups.max(1) as usize)
                .build(dir.unwrap_or(Path::new(".")))
                .context("Failed to create rolling log appender")?;
            Box::new(appender)
        }
        LogTarget::Append(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Box::new(file)
        }
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level filter: {}", config.level))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true);

    let result = match config.format.resolve() {
        LogFormat::Json => subscriber_builder
            .json()
            .with_current_span(true)
            .with_ansi(false)
            .try_init(),
        _ => subscriber_builder.with_ansi(to_console).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
