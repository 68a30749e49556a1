//! Vehicle map widget.
//!
//! Plots every marker inside the view bounds on a braille canvas. Line
//! labels are printed next to the dots while the map is sparse enough to
//! keep them readable.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Widget,
    },
};
use transitmap::map::{MapView, Marker, Region};

/// Above this many visible vehicles only the dots are drawn.
const MAX_LABELS: usize = 30;

/// Widget plotting marker positions inside a map view.
pub struct VehicleMapWidget<'a> {
    markers: &'a [Marker],
    view: &'a MapView,
}

impl<'a> VehicleMapWidget<'a> {
    pub fn new(markers: &'a [Marker], view: &'a MapView) -> Self {
        Self { markers, view }
    }
}

/// Canvas coordinates `(x = longitude, y = latitude)` of the markers inside
/// `bounds`.
pub fn visible_points(markers: &[Marker], bounds: &Region) -> Vec<(f64, f64)> {
    markers
        .iter()
        .filter(|m| bounds.contains(m.latitude(), m.longitude()))
        .map(|m| (m.longitude(), m.latitude()))
        .collect()
}

impl Widget for VehicleMapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bounds = self.view.bounds();
        let points = visible_points(self.markers, &bounds);
        let labelled: Vec<&Marker> = if points.len() <= MAX_LABELS {
            self.markers
                .iter()
                .filter(|m| bounds.contains(m.latitude(), m.longitude()))
                .collect()
        } else {
            Vec::new()
        };

        let title = format!(" Map z{} | {} in view ", self.view.zoom, points.len());

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(Span::styled(title, Style::default().fg(Color::Blue))),
            )
            .marker(symbols::Marker::Braille)
            .x_bounds([bounds.min_lon, bounds.max_lon])
            .y_bounds([bounds.min_lat, bounds.max_lat])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &points,
                    color: Color::Yellow,
                });
                for marker in &labelled {
                    let label = Span::styled(
                        marker.label.line.clone(),
                        Style::default().fg(Color::Cyan),
                    );
                    ctx.print(marker.longitude(), marker.latitude(), label);
                }
            })
            .render(area, buf);
    }
}
