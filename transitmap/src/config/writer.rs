//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::defaults::MIN_REFRESH_INTERVAL_MS;
use super::settings::ConfigFile;
use crate::map::{MAX_ZOOM, MIN_ZOOM};

/// Convert a `ConfigFile` to a commented INI string for saving.
pub fn to_config_string(config: &ConfigFile) -> String {
    let region = config
        .map
        .region
        .map(|r| r.to_string())
        .unwrap_or_default();

    format!(
        r#"[feed]
; SIRI VehicleMonitoring endpoint (JSON or XML)
; Examples:
;   https://ctb-siri.s3.eu-south-2.amazonaws.com/bizkaibus-vehicle-positions.xml
;   https://bustime.mta.info/api/siri/vehicle-monitoring.json?key=YOUR_KEY
url = {}
; Body encoding:
;   auto - decide per response from Content-Type and first byte (default)
;   json - SIRI JSON
;   xml  - SIRI XML
format = {}
; HTTP request timeout in seconds (default: 10)
timeout = {}

[refresh]
; Time between feed refreshes in milliseconds (minimum: {})
interval_ms = {}
; What happens when a refresh is still running at the next tick:
;   concurrent - start another refresh anyway; the last to finish wins (default)
;   chained    - wait for the running refresh, then one full interval
overlap = {}

[map]
; Initial map center in decimal degrees
center_lat = {}
center_lon = {}
; Initial zoom level ({}-{})
zoom = {}
; Only show vehicles inside min_lat,min_lon,max_lat,max_lon (empty = everywhere)
; Example (Bizkaia): region = 43,-3.5,43.5,-2.3
region = {}

[logging]
; Log file, truncated at every start
file = {}
"#,
        config.feed.url,
        config.feed.format,
        config.feed.timeout,
        MIN_REFRESH_INTERVAL_MS,
        config.refresh.interval_ms,
        config.refresh.overlap,
        config.map.center_lat,
        config.map.center_lon,
        MIN_ZOOM,
        MAX_ZOOM,
        config.map.zoom,
        region,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
