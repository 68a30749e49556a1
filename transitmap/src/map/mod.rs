//! Map presentation surface: markers, the marker layer seam and the map
//! context shared by refresh cycles.
//!
//! The refresh loop never talks to a concrete renderer. It writes markers to
//! a [`MarkerLayer`] held by the [`MapContext`], which is built once at
//! startup and handed to the scheduler. The terminal dashboard reads the
//! same layer through [`SharedMarkerLayer::snapshot`].

mod layer;
mod reconciler;
mod view;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::feed::VehicleRecord;

pub use layer::{LayerSnapshot, SharedMarkerLayer};
pub use reconciler::MarkerReconciler;
pub use view::{GeoPoint, MapView, Region, MAX_ZOOM, MIN_ZOOM};

/// Text attached to a marker: the line and its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerLabel {
    pub line: String,
    pub destination: String,
}

impl MarkerLabel {
    pub fn new(line: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            destination: destination.into(),
        }
    }

    /// Popup markup: the line in bold, the destination on the next line.
    pub fn to_html(&self) -> String {
        format!(
            "<strong>{}</strong><br>→ {}",
            escape_html(&self.line),
            escape_html(&self.destination)
        )
    }
}

impl fmt::Display for MarkerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.line, self.destination)
    }
}

/// A positioned, labelled map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: GeoPoint,
    pub label: MarkerLabel,
}

impl Marker {
    pub fn new(position: GeoPoint, label: MarkerLabel) -> Self {
        Self { position, label }
    }

    /// Build the marker for one vehicle record.
    pub fn from_record(record: &VehicleRecord) -> Self {
        Self::new(
            GeoPoint::new(record.latitude, record.longitude),
            MarkerLabel::new(&record.line_label, &record.destination_label),
        )
    }

    pub fn latitude(&self) -> f64 {
        self.position.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }

    /// Label rendered as HTML.
    pub fn label_html(&self) -> String {
        self.label.to_html()
    }
}

/// A display layer holding the visible marker set.
///
/// Methods take `&self`: implementations are shared between the refresh
/// loop and the renderer, so they manage their own interior mutability.
pub trait MarkerLayer: Send + Sync {
    /// Remove every displayed marker.
    fn clear_all_markers(&self);

    /// Display one more marker.
    fn add_marker(&self, marker: Marker);

    /// Replace the displayed set with `markers`.
    ///
    /// Layers that can swap the whole set at once should override this so
    /// readers never observe a partially rebuilt set.
    fn replace_markers(&self, markers: Vec<Marker>) {
        self.clear_all_markers();
        for marker in markers {
            self.add_marker(marker);
        }
    }
}

/// Map state handed to every refresh cycle.
#[derive(Clone)]
pub struct MapContext {
    /// Initial view, fixed at startup.
    pub view: MapView,

    /// Layer the reconciler writes to.
    pub layer: Arc<dyn MarkerLayer>,
}

impl MapContext {
    pub fn new(view: MapView, layer: Arc<dyn MarkerLayer>) -> Self {
        Self { view, layer }
    }
}

impl fmt::Debug for MapContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapContext")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_label_html() {
        let label = MarkerLabel::new("A3247", "Bilbao");
        assert_eq!(label.to_html(), "<strong>A3247</strong><br>→ Bilbao");
        assert_eq!(label.to_string(), "A3247 → Bilbao");
    }

    #[test]
    fn test_label_html_escapes_feed_text() {
        let label = MarkerLabel::new("<b>X</b>", "Moyua & \"Abando\" 'Sur'");
        assert_eq!(
            label.to_html(),
            "<strong>&lt;b&gt;X&lt;/b&gt;</strong><br>→ Moyua &amp; &quot;Abando&quot; &#39;Sur&#39;"
        );
    }

    #[test]
    fn test_marker_from_record() {
        let record = VehicleRecord::new(40.0, -74.0).with_line("A12");
        let marker = Marker::from_record(&record);
        assert_eq!(marker.latitude(), 40.0);
        assert_eq!(marker.longitude(), -74.0);
        assert_eq!(
            marker.label_html(),
            "<strong>A12</strong><br>→ Unknown destination"
        );
    }

    /// Layer that only implements the required methods, to exercise the
    /// default `replace_markers`.
    #[derive(Default)]
    struct VecLayer {
        markers: Mutex<Vec<Marker>>,
        clears: Mutex<usize>,
    }

    impl MarkerLayer for VecLayer {
        fn clear_all_markers(&self) {
            self.markers.lock().unwrap().clear();
            *self.clears.lock().unwrap() += 1;
        }

        fn add_marker(&self, marker: Marker) {
            self.markers.lock().unwrap().push(marker);
        }
    }

    #[test]
    fn test_default_replace_clears_then_adds() {
        let layer = VecLayer::default();
        layer.add_marker(Marker::from_record(&VehicleRecord::new(1.0, 1.0)));

        layer.replace_markers(vec![
            Marker::from_record(&VehicleRecord::new(2.0, 2.0)),
            Marker::from_record(&VehicleRecord::new(3.0, 3.0)),
        ]);

        let markers = layer.markers.lock().unwrap();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].latitude(), 2.0);
        assert_eq!(*layer.clears.lock().unwrap(), 1);
    }

    #[test]
    fn test_context_is_cheaply_cloned() {
        let layer = SharedMarkerLayer::new();
        let context = MapContext::new(MapView::new(GeoPoint::new(43.25, -2.93), 10), layer.clone());
        let copy = context.clone();

        copy.layer.add_marker(Marker::from_record(&VehicleRecord::new(43.2, -2.9)));
        assert_eq!(layer.snapshot().markers.len(), 1);
    }
}
