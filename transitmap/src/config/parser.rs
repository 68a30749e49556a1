//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::defaults::MIN_REFRESH_INTERVAL_MS;
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::map::{Region, MAX_ZOOM, MIN_ZOOM};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [feed] section
    if let Some(section) = ini.section(Some("feed")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(invalid("feed", "url", v, "must be an http:// or https:// URL"));
            }
            config.feed.url = v.to_string();
        }
        if let Some(v) = section.get("format") {
            config.feed.format = v
                .parse()
                .map_err(|_| invalid("feed", "format", v, "must be one of: auto, json, xml"))?;
        }
        if let Some(v) = section.get("timeout") {
            config.feed.timeout = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "feed",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
    }

    // [refresh] section
    if let Some(section) = ini.section(Some("refresh")) {
        if let Some(v) = section.get("interval_ms") {
            config.refresh.interval_ms = match v.trim().parse::<u64>() {
                Ok(ms) if ms >= MIN_REFRESH_INTERVAL_MS => ms,
                _ => {
                    return Err(invalid(
                        "refresh",
                        "interval_ms",
                        v,
                        &format!("must be an integer of at least {}", MIN_REFRESH_INTERVAL_MS),
                    ))
                }
            };
        }
        if let Some(v) = section.get("overlap") {
            config.refresh.overlap = v.parse().map_err(|_| {
                invalid("refresh", "overlap", v, "must be 'concurrent' or 'chained'")
            })?;
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("center_lat") {
            config.map.center_lat = parse_degrees(v, 90.0)
                .ok_or_else(|| invalid("map", "center_lat", v, "must be between -90 and 90"))?;
        }
        if let Some(v) = section.get("center_lon") {
            config.map.center_lon = parse_degrees(v, 180.0)
                .ok_or_else(|| invalid("map", "center_lon", v, "must be between -180 and 180"))?;
        }
        if let Some(v) = section.get("zoom") {
            config.map.zoom = match v.trim().parse::<u8>() {
                Ok(z) if (MIN_ZOOM..=MAX_ZOOM).contains(&z) => z,
                _ => {
                    return Err(invalid(
                        "map",
                        "zoom",
                        v,
                        &format!("must be an integer from {} to {}", MIN_ZOOM, MAX_ZOOM),
                    ))
                }
            };
        }
        if let Some(v) = section.get("region") {
            let v = v.trim();
            config.map.region = if v.is_empty() {
                None
            } else {
                Some(
                    v.parse::<Region>()
                        .map_err(|reason| invalid("map", "region", v, &reason))?,
                )
            };
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_degrees(value: &str, limit: f64) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && d.abs() <= limit)
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
