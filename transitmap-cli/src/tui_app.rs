//! Display loops for the run command.
//!
//! Both loops only read shared snapshots; the refresh loop runs on its own
//! thread and is stopped by the caller once these return.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use transitmap::map::{MapView, SharedMarkerLayer};
use transitmap::refresh::{RefreshSnapshot, SharedRefreshStatus};

use crate::error::CliError;
use crate::ui::dashboard::print_simple_status;
use crate::ui::{Dashboard, DashboardConfig, DashboardEvent};

/// Dashboard redraw period.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Shared handles the display loops read from.
pub struct RefreshSession {
    pub feed_url: String,
    pub view: MapView,
    pub layer: Arc<SharedMarkerLayer>,
    pub status: Arc<SharedRefreshStatus>,
    pub shutdown: Arc<AtomicBool>,
}

/// Run the full-screen dashboard until the user quits.
pub fn run_tui(session: &RefreshSession) -> Result<(), CliError> {
    let config = DashboardConfig {
        feed_url: session.feed_url.clone(),
        view: session.view,
    };
    let mut dashboard =
        Dashboard::new(config, session.shutdown.clone()).map_err(CliError::Dashboard)?;

    let mut last_draw: Option<Instant> = None;
    loop {
        if let Some(DashboardEvent::Quit) = dashboard.poll_event().map_err(CliError::Dashboard)? {
            tracing::info!("Dashboard quit requested");
            break;
        }

        if last_draw.map_or(true, |t| t.elapsed() >= TICK_RATE) {
            dashboard
                .draw(&session.layer.snapshot(), &session.status.snapshot())
                .map_err(CliError::Dashboard)?;
            last_draw = Some(Instant::now());
        }
    }

    dashboard.restore().map_err(CliError::Dashboard)
}

/// Print a status line whenever the markers change or a cycle fails.
pub fn run_headless(session: &RefreshSession) -> Result<(), CliError> {
    println!("Polling {}", session.feed_url);
    println!("Press Ctrl+C to stop.");
    println!();

    let mut last_seen = HeadlessCursor::default();

    while !session.shutdown.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));

        let snapshot = session.status.snapshot();
        if last_seen.advance(session.layer.generation(), &snapshot) {
            print_simple_status(&snapshot);
        }
    }

    Ok(())
}

/// What headless mode last reported.
#[derive(Debug, Default)]
struct HeadlessCursor {
    generation: u64,
    cycles_failed: u64,
}

impl HeadlessCursor {
    /// Record the latest values; true when something new should be printed.
    fn advance(&mut self, generation: u64, snapshot: &RefreshSnapshot) -> bool {
        let changed =
            generation != self.generation || snapshot.cycles_failed != self.cycles_failed;
        self.generation = generation;
        self.cycles_failed = snapshot.cycles_failed;
        changed
    }
}
