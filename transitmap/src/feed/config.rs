//! Configuration for the vehicle feed client.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default SIRI VehicleMonitoring feed (Bizkaibus vehicle positions).
pub const DEFAULT_FEED_URL: &str =
    "https://ctb-siri.s3.eu-south-2.amazonaws.com/bizkaibus-vehicle-positions.xml";

/// Default HTTP timeout for a single feed request.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every feed request.
pub const USER_AGENT: &str = concat!("transitmap/", env!("CARGO_PKG_VERSION"));

/// Encoding of the feed body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedFormat {
    /// Decide per response from the content type and the first byte.
    #[default]
    Auto,
    /// SIRI JSON (e.g. MTA Bus Time).
    Json,
    /// SIRI XML.
    Xml,
}

impl FeedFormat {
    /// Config/CLI spelling of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedFormat::Auto => "auto",
            FeedFormat::Json => "json",
            FeedFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(FeedFormat::Auto),
            "json" => Ok(FeedFormat::Json),
            "xml" => Ok(FeedFormat::Xml),
            other => Err(format!("unknown feed format '{}'", other)),
        }
    }
}

/// Configuration for the HTTP feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Feed endpoint.
    pub url: String,

    /// Body encoding.
    pub format: FeedFormat,

    /// Request timeout.
    pub timeout: Duration,
}

impl FeedConfig {
    /// Create a config for the given URL with default format and timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: FeedFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            format: FeedFormat::Auto,
            timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
        }
    }
}
