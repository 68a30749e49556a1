//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::io;
use std::process;

use transitmap::config::ConfigFileError;
use transitmap::feed::FetchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid command-line or configuration value
    Config(String),
    /// Failed to load or save the config file
    ConfigFile(ConfigFileError),
    /// Feed could not be fetched or decoded
    Fetch(FetchError),
    /// Failed to start or join the refresh runtime
    Runtime(io::Error),
    /// Terminal dashboard error
    Dashboard(io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Fetch(e) if e.is_transport() => {
                eprintln!();
                eprintln!("Check that:");
                eprintln!("  1. The feed URL is reachable from this machine");
                eprintln!("  2. Any proxy settings allow HTTPS to the feed host");
            }
            CliError::Fetch(_) => {
                eprintln!();
                eprintln!("The feed answered but could not be read.");
                eprintln!("Try forcing the payload format with --format json or --format xml.");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in the config file or regenerate it with:");
                eprintln!("  transitmap config init --force");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Fetch(e) => write!(f, "Failed to fetch vehicle feed: {}", e),
            CliError::Runtime(e) => write!(f, "Refresh runtime error: {}", e),
            CliError::Dashboard(e) => write!(f, "Dashboard error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Dashboard(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = CliError::Config("bad interval".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad interval");

        let err = CliError::Fetch(FetchError::HttpStatus(503));
        assert!(err.to_string().starts_with("Failed to fetch vehicle feed"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_source_is_forwarded() {
        let err: CliError = FetchError::HttpStatus(404).into();
        assert!(err.source().is_some());

        let err = CliError::LoggingInit("already set".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_config_file_error_conversion() {
        let err: CliError = ConfigFileError::InvalidValue {
            section: "refresh".to_string(),
            key: "interval_ms".to_string(),
            value: "10".to_string(),
            reason: "too small".to_string(),
        }
        .into();

        assert!(matches!(err, CliError::ConfigFile(_)));
        assert!(err.to_string().contains("refresh.interval_ms"));
    }
}
