//! SIRI VehicleMonitoring feed: retrieval, decoding and record extraction.
//!
//! # Architecture
//!
//! ```text
//! FeedFetcher::fetch()
//!     │
//!     ├── FeedClient trait → HttpFeedClient (reqwest GET)
//!     │       │
//!     │       └── FeedPayload::decode (JSON, or XML via feed::xml)
//!     │
//!     └── FeedPayload::extract
//!             Siri → ServiceDelivery → VehicleMonitoringDelivery[0] → VehicleActivity
//!             └── VehicleRecord::from_activity (per entry, malformed → skipped)
//! ```
//!
//! The payload is navigated as an optional tree: any absent segment ends the
//! walk with an empty record list instead of an error.

mod client;
mod config;
mod error;
mod fetcher;
mod payload;
mod record;
mod xml;

pub use client::{FeedClient, HttpFeedClient};
pub use config::{
    FeedConfig, FeedFormat, DEFAULT_FEED_TIMEOUT_SECS, DEFAULT_FEED_URL, USER_AGENT,
};
pub use error::FetchError;
pub use fetcher::FeedFetcher;
pub use payload::{child, entries, walk, Extraction, FeedPayload, VEHICLE_ACTIVITY_PATH};
pub use record::{VehicleRecord, UNKNOWN_DESTINATION, UNKNOWN_ROUTE};
