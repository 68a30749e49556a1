//! Geographic view primitives: points, the initial map view and bounding
//! boxes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Lowest zoom level accepted for a map view.
pub const MIN_ZOOM: u8 = 1;

/// Highest zoom level accepted for a map view.
pub const MAX_ZOOM: u8 = 19;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Initial center and zoom of the map, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl MapView {
    /// Create a view, clamping `zoom` to `MIN_ZOOM..=MAX_ZOOM`.
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Longitude span covered at this zoom level, in degrees.
    ///
    /// Zoom 0 would show the whole world (360°); each level halves it.
    pub fn longitude_span(&self) -> f64 {
        360.0 / f64::from(1u32 << self.zoom)
    }

    /// Bounding box visible around the center.
    ///
    /// The latitude extent is shrunk by `cos(latitude)` so that a degree of
    /// latitude and a degree of longitude cover similar ground distance.
    pub fn bounds(&self) -> Region {
        let half_lon = self.longitude_span() / 2.0;
        let half_lat = half_lon * self.center.latitude.to_radians().cos().abs();

        Region {
            min_lat: (self.center.latitude - half_lat).max(-90.0),
            min_lon: (self.center.longitude - half_lon).max(-180.0),
            max_lat: (self.center.latitude + half_lat).min(90.0),
            max_lon: (self.center.longitude + half_lon).min(180.0),
        }
    }
}

/// An axis-aligned latitude/longitude bounding box, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Region {
    /// Bizkaia province, the coverage area of the Bizkaibus feed.
    pub const BIZKAIA: Region = Region {
        min_lat: 43.0,
        min_lon: -3.5,
        max_lat: 43.5,
        max_lon: -2.3,
    };

    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Whether the position lies inside the box.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

impl FromStr for Region {
    type Err = String;

    /// Parse `min_lat,min_lon,max_lat,max_lon`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!(
                "expected min_lat,min_lon,max_lat,max_lon, got {} value(s)",
                parts.len()
            ));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", part))?;
        }
        let [min_lat, min_lon, max_lat, max_lon] = values;

        if !(-90.0..=90.0).contains(&min_lat) || !(-90.0..=90.0).contains(&max_lat) {
            return Err("latitude must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&min_lon) || !(-180.0..=180.0).contains(&max_lon) {
            return Err("longitude must be between -180 and 180".to_string());
        }
        if min_lat > max_lat || min_lon > max_lon {
            return Err("minimum must not exceed maximum".to_string());
        }

        Ok(Region::new(min_lat, min_lon, max_lat, max_lon))
    }
}
