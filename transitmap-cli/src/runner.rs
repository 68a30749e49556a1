//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading and logging initialization so command
//! handlers start from the same state.

use std::path::{Path, PathBuf};

use tracing::info;
use transitmap::config::{ConfigFile, DEFAULT_LOG_FILE_NAME};
use transitmap::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// Pass `stdout_enabled = false` while the TUI dashboard owns the screen
    /// or when stdout carries machine-readable output.
    pub fn with_stdout_logging(debug_mode: bool, stdout_enabled: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, stdout_enabled, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Path of the active log file.
    pub fn log_path(&self) -> &Path {
        self.logging_guard.log_path()
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("transitmap v{}", transitmap::VERSION);
        info!(log = %self.log_path().display(), "transitmap CLI: {} command", command);
    }
}

/// Split the configured log path into the directory and file name.
fn split_log_path(path: &Path) -> (PathBuf, String) {
    let log_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let log_file = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string());
    (log_dir, log_file)
}
