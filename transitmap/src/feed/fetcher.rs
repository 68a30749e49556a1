//! Feed fetcher: one network round trip to a flat record list.

use super::client::FeedClient;
use super::error::FetchError;
use super::record::VehicleRecord;
use crate::map::Region;

/// Retrieves the feed and normalizes it into [`VehicleRecord`]s.
///
/// Missing sub-structures in the payload yield fewer (or no) records rather
/// than an error; only transport and decoding failures are reported.
pub struct FeedFetcher<C: FeedClient> {
    client: C,
    region: Option<Region>,
}

impl<C: FeedClient> FeedFetcher<C> {
    /// Create a fetcher with no region restriction.
    pub fn new(client: C) -> Self {
        Self {
            client,
            region: None,
        }
    }

    /// Restrict records to a bounding box. `None` keeps every position.
    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    /// Fetch the feed once and extract every valid vehicle record.
    pub async fn fetch(&self) -> Result<Vec<VehicleRecord>, FetchError> {
        let payload = self.client.fetch_payload().await?;
        let extraction = payload.extract();

        let entries = extraction.entries();
        let skipped = extraction.skipped;
        let mut records = extraction.records;

        let mut outside_region = 0;
        if let Some(region) = &self.region {
            let before = records.len();
            records.retain(|r| region.contains(r.latitude, r.longitude));
            outside_region = before - records.len();
        }

        tracing::debug!(
            entries,
            records = records.len(),
            skipped,
            outside_region,
            "Vehicle feed extracted"
        );

        Ok(records)
    }
}
