// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for SEM binaries
//!
//! Console output is always installed. With the `file-logging` feature a
//! timestamped run folder receives a plain-text copy of the log:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── sem.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Options for [`init_logging`]
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Level for everything not raised by a debug flag
    pub level: String,
    pub ansi: bool,
    /// Base directory for log files; `None` disables file output
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
            log_dir: None,
        }
    }
}

/// Keeps the file writer alive; logs are flushed when it is dropped.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file output is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the level filter from the debug flags
pub fn build_filter(debug_flags: &CrateDebugFlags, level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(level);
    EnvFilter::try_new(&directives).with_context(|| format!("Invalid log filter: {}", directives))
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber.
///
/// # Errors
/// Fails if the filter is invalid, the log folder cannot be created, or a
/// global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<LoggingGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(options.ansi)
        .with_filter(build_filter(debug_flags, &options.level)?)
        .boxed();
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guard, log_dir) = match &options.log_dir {
        Some(base_log_dir) => {
            let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
            let run_folder = base_log_dir.join(format!("run_{}", timestamp));
            std::fs::create_dir_all(&run_folder)
                .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

            let file_appender = tracing_appender::rolling::never(&run_folder, "sem.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(build_filter(debug_flags, &options.level)?)
                .boxed();
            layers.push(file_layer);

            (Some(guard), Some(run_folder))
        }
        None => (None, None),
    };

    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    #[cfg(not(feature = "file-logging"))]
    if options.log_dir.is_some() {
        tracing::warn!("File logging requested but the `file-logging` feature is disabled");
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guard: file_guard,
        log_dir,
    })
}

/// Initialize console logging at `info` with the given debug flags
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_flags() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-sem-layers".to_string()]);
        assert!(build_filter(&flags, "warn").is_ok());
    }

    #[test]
    fn test_build_filter_rejects_unknown_level() {
        assert!(build_filter(&CrateDebugFlags::default(), "sem_layers=bogus").is_err());
    }
}
