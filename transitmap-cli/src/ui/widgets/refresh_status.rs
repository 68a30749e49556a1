//! Refresh status widget.
//!
//! Layout:
//! ```text
//! ┌─ Refresh ────────────────────────────────────────────────┐
//! │ State   : Refreshing... | every 15s (concurrent)         │
//! │ Cycles  : 12 started | 11 ok | 1 failed | 1 in flight    │
//! │ Update  : 14:02:31 | 87 vehicles                         │
//! │ Error   : Feed returned HTTP status 503                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use transitmap::refresh::{RefreshSnapshot, SchedulerState};

/// Widget displaying scheduler counters and the latest error.
pub struct RefreshStatusWidget<'a> {
    snapshot: &'a RefreshSnapshot,
}

impl<'a> RefreshStatusWidget<'a> {
    pub fn new(snapshot: &'a RefreshSnapshot) -> Self {
        Self { snapshot }
    }

    fn label(text: &'static str) -> Span<'static> {
        Span::styled(text, Style::default().fg(Color::DarkGray))
    }

    fn separator() -> Span<'static> {
        Span::styled(" | ", Style::default().fg(Color::DarkGray))
    }

    fn state_line(&self) -> Line<'static> {
        let (text, color) = if self.snapshot.stopped {
            ("Stopped".to_string(), Color::DarkGray)
        } else {
            match self.snapshot.state() {
                SchedulerState::Running => (SchedulerState::Running.to_string(), Color::Yellow),
                SchedulerState::Idle => (SchedulerState::Idle.to_string(), Color::Green),
            }
        };

        let mut spans = vec![
            Self::label("   State   : "),
            Span::styled(text, Style::default().fg(color)),
        ];
        if self.snapshot.is_degraded() {
            spans.push(Self::separator());
            spans.push(Span::styled(
                "showing last good data",
                Style::default().fg(Color::Red),
            ));
        }
        Line::from(spans)
    }

    fn cycles_line(&self) -> Line<'static> {
        let failed_color = if self.snapshot.cycles_failed > 0 {
            Color::Red
        } else {
            Color::White
        };

        Line::from(vec![
            Self::label("   Cycles  : "),
            Span::raw(format!("{} started", self.snapshot.cycles_started)),
            Self::separator(),
            Span::styled(
                format!("{} ok", self.snapshot.cycles_succeeded),
                Style::default().fg(Color::Green),
            ),
            Self::separator(),
            Span::styled(
                format!("{} failed", self.snapshot.cycles_failed),
                Style::default().fg(failed_color),
            ),
            Self::separator(),
            Span::raw(format!("{} in flight", self.snapshot.in_flight)),
        ])
    }

    fn update_line(&self) -> Line<'static> {
        let last = self
            .snapshot
            .last_success
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "waiting for first response".to_string());

        Line::from(vec![
            Self::label("   Update  : "),
            Span::styled(last, Style::default().fg(Color::White)),
            Self::separator(),
            Span::raw(format!("{} vehicles", self.snapshot.markers)),
        ])
    }

    fn error_line(&self) -> Line<'static> {
        let (text, color) = match &self.snapshot.last_error {
            Some(error) if self.snapshot.is_degraded() => (error.clone(), Color::Red),
            Some(error) => (error.clone(), Color::DarkGray),
            None => ("none".to_string(), Color::DarkGray),
        };

        Line::from(vec![
            Self::label("   Error   : "),
            Span::styled(text, Style::default().fg(color)),
        ])
    }
}

impl Widget for RefreshStatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            self.state_line(),
            self.cycles_line(),
            self.update_line(),
            self.error_line(),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}
