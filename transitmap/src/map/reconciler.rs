//! Marker reconciliation: records in, full marker set out.

use super::{MapContext, Marker};
use crate::feed::VehicleRecord;

/// Replaces the displayed marker set with one marker per vehicle record.
///
/// Stateless; the displayed set lives in the context's layer. Records are
/// assumed valid, the fetcher having already dropped unusable entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerReconciler;

impl MarkerReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Discard every displayed marker and show `records` instead.
    ///
    /// Returns the number of markers now displayed, always `records.len()`.
    pub fn reconcile(&self, context: &MapContext, records: &[VehicleRecord]) -> usize {
        let markers: Vec<Marker> = records.iter().map(Marker::from_record).collect();
        let count = markers.len();

        context.layer.replace_markers(markers);

        tracing::trace!(markers = count, "Marker set replaced");
        count
    }
}
