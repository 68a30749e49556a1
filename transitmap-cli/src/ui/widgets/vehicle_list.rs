//! Vehicle list widget.
//!
//! Layout:
//! ```text
//! ┌─ Vehicles (3) ──────────────────┐
//! │ A3247   → Bilbao                │
//! │ A3514   → Mungia                │
//! │ Unknown route → Unknown destin… │
//! └─────────────────────────────────┘
//! ```

use std::cmp::Ordering;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};
use transitmap::feed::UNKNOWN_ROUTE;
use transitmap::map::Marker;

/// Widget listing the displayed markers by line.
pub struct VehicleListWidget<'a> {
    markers: &'a [Marker],
}

impl<'a> VehicleListWidget<'a> {
    pub fn new(markers: &'a [Marker]) -> Self {
        Self { markers }
    }
}

/// Markers ordered by line, then destination. Unknown routes sort last.
pub fn sorted_by_line(markers: &[Marker]) -> Vec<&Marker> {
    let mut sorted: Vec<&Marker> = markers.iter().collect();
    sorted.sort_by(|a, b| {
        compare_lines(&a.label.line, &b.label.line)
            .then_with(|| a.label.destination.cmp(&b.label.destination))
    });
    sorted
}

fn compare_lines(a: &str, b: &str) -> Ordering {
    (a == UNKNOWN_ROUTE)
        .cmp(&(b == UNKNOWN_ROUTE))
        .then_with(|| a.cmp(b))
}

impl Widget for VehicleListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self
            .markers
            .iter()
            .map(|m| m.label.line.chars().count())
            .max()
            .unwrap_or(0)
            .min(12);

        let items: Vec<ListItem> = sorted_by_line(self.markers)
            .into_iter()
            .map(|marker| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", marker.label.line),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(" → ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        marker.label.destination.clone(),
                        Style::default().fg(Color::White),
                    ),
                ]))
            })
            .collect();

        let title = format!(" Vehicles ({}) ", self.markers.len());
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(Span::styled(title, Style::default().fg(Color::Blue))),
            )
            .render(area, buf);
    }
}
