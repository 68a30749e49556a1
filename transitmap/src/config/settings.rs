//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::feed::FeedFormat;
use crate::map::Region;
use crate::refresh::OverlapPolicy;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Feed endpoint settings
    pub feed: FeedSettings,
    /// Refresh loop settings
    pub refresh: RefreshSettings,
    /// Initial map view settings
    pub map: MapSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Feed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    /// SIRI VehicleMonitoring endpoint.
    pub url: String,
    /// Body encoding: auto, json or xml.
    pub format: FeedFormat,
    /// HTTP request timeout in seconds.
    pub timeout: u64,
}

/// Refresh loop configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSettings {
    /// Refresh interval in milliseconds.
    pub interval_ms: u64,
    /// Whether a tick may start a cycle while another is in flight.
    pub overlap: OverlapPolicy,
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    /// 1..=19
    pub zoom: u8,
    /// Positions outside this box are dropped. `None` keeps everything.
    pub region: Option<Region>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path.
    pub file: PathBuf,
}
