//! transitmap - live transit vehicle positions from SIRI feeds
//!
//! This library polls a SIRI VehicleMonitoring feed on a fixed interval and
//! keeps a marker layer in sync with the reported vehicle positions.
//!
//! # High-Level API
//!
//! ```ignore
//! use transitmap::feed::{FeedConfig, FeedFetcher, HttpFeedClient};
//! use transitmap::map::{GeoPoint, MapContext, MapView, SharedMarkerLayer};
//! use transitmap::refresh::{RefreshConfig, RefreshScheduler};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = HttpFeedClient::new(FeedConfig::default())?;
//! let layer = SharedMarkerLayer::new();
//! let context = MapContext::new(MapView::new(GeoPoint::new(43.25, -2.93), 10), layer.clone());
//!
//! let scheduler = RefreshScheduler::new(FeedFetcher::new(client), context, RefreshConfig::default());
//! let cancel = CancellationToken::new();
//! let handle = scheduler.start(cancel.clone());
//!
//! // ... render layer.snapshot() ...
//!
//! cancel.cancel();
//! handle.await?;
//! ```

pub mod config;
pub mod feed;
pub mod logging;
pub mod map;
pub mod refresh;

/// Version of the transitmap library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
