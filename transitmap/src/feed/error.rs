//! Error types for the vehicle feed.

use thiserror::Error;

/// Errors that abandon a single refresh cycle.
///
/// None of these are fatal to the refresh loop: the scheduler logs them and
/// the display keeps the markers from the last successful cycle. Malformed
/// individual entries are not represented here at all; they are skipped
/// during extraction.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// HTTP request failed (connection, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The feed answered with a non-success status code.
    #[error("Feed returned HTTP status {0}")]
    HttpStatus(u16),

    /// JSON deserialization failed.
    #[error("Failed to parse JSON feed: {0}")]
    JsonError(String),

    /// XML parsing failed.
    #[error("Failed to parse XML feed: {0}")]
    XmlError(String),
}

impl FetchError {
    /// Whether the failure happened before any payload was received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::ClientBuild(_) | FetchError::HttpError(_) | FetchError::HttpStatus(_)
        )
    }
}
