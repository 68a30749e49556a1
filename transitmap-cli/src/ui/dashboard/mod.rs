//! Main TUI dashboard for transitmap.
//!
//! Displays the refresh loop status, a map of the current markers and the
//! vehicle list.
//!
//! # Module Structure
//!
//! - `state` - State enums and data structs (no rendering dependencies)
//! - `render` - Layout orchestration
//! - `utils` - Formatting and non-TUI output

mod render;
pub mod state;
pub mod utils;

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use transitmap::map::LayerSnapshot;
use transitmap::refresh::RefreshSnapshot;

pub use state::{DashboardConfig, DashboardEvent};
pub use utils::print_simple_status;

/// The main dashboard UI.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    config: DashboardConfig,
    shutdown: Arc<AtomicBool>,
    start_time: Instant,
}

impl Dashboard {
    /// Enter raw mode and the alternate screen.
    pub fn new(config: DashboardConfig, shutdown: Arc<AtomicBool>) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            config,
            shutdown,
            start_time: Instant::now(),
        })
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw one frame from the current layer and status snapshots.
    pub fn draw(&mut self, layer: &LayerSnapshot, status: &RefreshSnapshot) -> io::Result<()> {
        let uptime = self.start_time.elapsed();
        let config = &self.config;

        self.terminal.draw(|frame| {
            render::render_ui(frame, config, layer, status, uptime);
        })?;

        Ok(())
    }

    /// Check for events (non-blocking).
    ///
    /// Raw mode swallows SIGINT, so Ctrl+C arrives here as a key press.
    pub fn poll_event(&mut self) -> io::Result<Option<DashboardEvent>> {
        if self.shutdown.load(Ordering::SeqCst) {
            return Ok(Some(DashboardEvent::Quit));
        }

        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(Some(DashboardEvent::Quit));
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(Some(DashboardEvent::Quit));
                        }
                        _ => {}
                    }
                }
            }
        }

        Ok(None)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
