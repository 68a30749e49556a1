//! Main dashboard rendering.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (3 lines)                                        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Refresh status (6 lines)                                │
//! ├──────────────────────────────────────┬──────────────────┤
//! │ Vehicle map                          │ Vehicle list     │
//! │                                      │                  │
//! └──────────────────────────────────────┴──────────────────┘
//! ```

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use transitmap::map::LayerSnapshot;
use transitmap::refresh::RefreshSnapshot;

use super::state::DashboardConfig;
use super::utils::format_duration;
use crate::ui::widgets::{RefreshStatusWidget, VehicleListWidget, VehicleMapWidget};

/// Width of the vehicle list column.
const LIST_WIDTH: u16 = 38;

/// Render the dashboard to the frame.
pub fn render_ui(
    frame: &mut Frame,
    config: &DashboardConfig,
    layer: &LayerSnapshot,
    status: &RefreshSnapshot,
    uptime: Duration,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Refresh status
            Constraint::Min(8),    // Map + list
        ])
        .split(frame.area());

    render_header(frame, chunks[0], config, uptime);

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Refresh ", Style::default().fg(Color::Blue)));
    let status_inner = status_block.inner(chunks[1]);
    frame.render_widget(status_block, chunks[1]);
    frame.render_widget(RefreshStatusWidget::new(status), status_inner);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(LIST_WIDTH)])
        .split(chunks[2]);

    frame.render_widget(VehicleMapWidget::new(&layer.markers, &config.view), body[0]);
    frame.render_widget(VehicleListWidget::new(&layer.markers), body[1]);
}

fn render_header(frame: &mut Frame, area: Rect, config: &DashboardConfig, uptime: Duration) {
    let title = Line::from(vec![
        Span::styled(
            format!(" transitmap v{}", transitmap::VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(config.feed_host().to_string(), Style::default().fg(Color::White)),
        Span::styled(" | up ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_duration(uptime)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" to quit", Style::default().fg(Color::DarkGray)),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use transitmap::map::{GeoPoint, MapView, Marker, MarkerLabel};

    #[test]
    fn test_render_full_dashboard() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let config = DashboardConfig {
            feed_url: "https://feeds.example.com/vm.xml".to_string(),
            view: MapView::new(GeoPoint::new(43.25, -2.93), 10),
        };
        let layer = LayerSnapshot {
            markers: vec![Marker::new(
                GeoPoint::new(43.26, -2.92),
                MarkerLabel::new("A3247", "Bilbao"),
            )],
            generation: 1,
            updated_at: None,
        };
        let status = RefreshSnapshot {
            cycles_started: 1,
            cycles_succeeded: 1,
            markers: 1,
            ..Default::default()
        };

        terminal
            .draw(|frame| {
                render_ui(frame, &config, &layer, &status, Duration::from_secs(75));
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("feeds.example.com"));
        assert!(text.contains("00:01:15"));
        assert!(text.contains("Vehicles (1)"));
        assert!(text.contains("1 ok"));
    }
}
