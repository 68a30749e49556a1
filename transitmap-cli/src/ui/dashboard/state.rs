//! State types for the dashboard.
//!
//! These types are independent of rendering and can be tested in isolation.

use transitmap::map::MapView;

/// Events that can occur in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// User requested quit (Ctrl+C, 'q' or Esc).
    Quit,
}

/// Static dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Feed endpoint shown in the header.
    pub feed_url: String,
    /// Viewport of the vehicle map.
    pub view: MapView,
}

impl DashboardConfig {
    /// Host part of the feed URL, for the header.
    pub fn feed_host(&self) -> &str {
        feed_host(&self.feed_url)
    }
}

/// Strip scheme, path and query from a URL.
pub fn feed_host(url: &str) -> &str {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_host() {
        assert_eq!(
            feed_host("https://ctb-siri.s3.eu-south-2.amazonaws.com/bizkaibus-vehicle-positions.xml"),
            "ctb-siri.s3.eu-south-2.amazonaws.com"
        );
        assert_eq!(feed_host("http://localhost:8080?x=1"), "localhost:8080");
        assert_eq!(feed_host("example.com/feed"), "example.com");
    }
}
