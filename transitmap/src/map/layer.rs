//! In-memory marker layer shared between the refresh loop and the renderer.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Local};

use super::{Marker, MarkerLayer};

/// Point-in-time copy of the layer contents.
#[derive(Debug, Clone, Default)]
pub struct LayerSnapshot {
    /// Markers currently displayed.
    pub markers: Vec<Marker>,

    /// Incremented on every mutation; lets a renderer skip unchanged frames.
    pub generation: u64,

    /// When the set was last changed.
    pub updated_at: Option<DateTime<Local>>,
}

/// Thread-safe marker layer.
///
/// [`MarkerLayer::replace_markers`] swaps the whole set under one write lock,
/// so [`snapshot`](Self::snapshot) returns either the old set or the new
/// one, never a mix.
#[derive(Debug, Default)]
pub struct SharedMarkerLayer {
    inner: RwLock<LayerSnapshot>,
}

impl SharedMarkerLayer {
    /// Create an empty shared layer.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get a copy of the current contents.
    pub fn snapshot(&self) -> LayerSnapshot {
        self.inner
            .read()
            .map(|inner| inner.clone())
            .unwrap_or_default()
    }

    /// Number of markers currently displayed.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.markers.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current generation counter.
    pub fn generation(&self) -> u64 {
        self.inner.read().map(|inner| inner.generation).unwrap_or(0)
    }

    fn mutate(&self, f: impl FnOnce(&mut Vec<Marker>)) {
        if let Ok(mut inner) = self.inner.write() {
            f(&mut inner.markers);
            inner.generation += 1;
            inner.updated_at = Some(Local::now());
        }
    }
}

impl MarkerLayer for SharedMarkerLayer {
    fn clear_all_markers(&self) {
        self.mutate(|markers| markers.clear());
    }

    fn add_marker(&self, marker: Marker) {
        self.mutate(|markers| markers.push(marker));
    }

    fn replace_markers(&self, markers: Vec<Marker>) {
        self.mutate(|current| *current = markers);
    }
}
