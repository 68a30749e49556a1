//! Default values and constants for all configuration settings.
//!
//! Contains the `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::file::config_directory;
use super::settings::*;
use crate::feed::{FeedFormat, DEFAULT_FEED_TIMEOUT_SECS, DEFAULT_FEED_URL};
use crate::refresh::{OverlapPolicy, DEFAULT_REFRESH_INTERVAL_MS};

/// Default map center latitude (Bilbao, Bizkaia).
pub const DEFAULT_CENTER_LAT: f64 = 43.25;

/// Default map center longitude (Bilbao, Bizkaia).
pub const DEFAULT_CENTER_LON: f64 = -2.93;

/// Default zoom level; frames the province.
pub const DEFAULT_ZOOM: u8 = 10;

/// Smallest refresh interval accepted from the config file.
pub const MIN_REFRESH_INTERVAL_MS: u64 = 1_000;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "transitmap.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            feed: FeedSettings {
                url: DEFAULT_FEED_URL.to_string(),
                format: FeedFormat::Auto,
                timeout: DEFAULT_FEED_TIMEOUT_SECS,
            },
            refresh: RefreshSettings {
                interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
                overlap: OverlapPolicy::default(),
            },
            map: MapSettings {
                center_lat: DEFAULT_CENTER_LAT,
                center_lon: DEFAULT_CENTER_LON,
                zoom: DEFAULT_ZOOM,
                region: None,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
