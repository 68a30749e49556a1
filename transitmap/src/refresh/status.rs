//! Refresh loop status shared with the UI.

use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Local};

/// Scheduler state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Waiting for the next tick.
    #[default]
    Idle,
    /// At least one fetch+reconcile cycle is in flight.
    Running,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Refreshing..."),
        }
    }
}

/// Snapshot of refresh status for display.
#[derive(Debug, Clone, Default)]
pub struct RefreshSnapshot {
    /// Cycles started since the loop began.
    pub cycles_started: u64,
    /// Cycles that reconciled a fresh record list.
    pub cycles_succeeded: u64,
    /// Cycles abandoned on a fetch error or panic.
    pub cycles_failed: u64,
    /// Cycles currently in flight.
    pub in_flight: usize,
    /// Markers displayed after the most recent successful cycle.
    pub markers: usize,
    /// Completion time of the most recent successful cycle.
    pub last_success: Option<DateTime<Local>>,
    /// Error text of the most recent failed cycle.
    pub last_error: Option<String>,
    /// Whether the most recently settled cycle failed.
    pub last_cycle_failed: bool,
    /// Whether the loop has stopped (cancelled).
    pub stopped: bool,
}

impl RefreshSnapshot {
    /// Idle when nothing is in flight, Running otherwise.
    pub fn state(&self) -> SchedulerState {
        if self.in_flight > 0 {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Markers are stale: the latest settled cycle failed.
    pub fn is_degraded(&self) -> bool {
        self.last_cycle_failed
    }

    /// Format the counters as a single line.
    pub fn summary_line(&self) -> String {
        let last = self
            .last_success
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        format!(
            "{} | {} vehicles | cycles {} ok / {} failed | last update {}",
            self.state(),
            self.markers,
            self.cycles_succeeded,
            self.cycles_failed,
            last
        )
    }
}

/// Shared refresh status for display in the UI.
///
/// Written by every cycle task, read by the dashboard on each frame.
#[derive(Debug, Default)]
pub struct SharedRefreshStatus {
    inner: RwLock<RefreshSnapshot>,
}

impl SharedRefreshStatus {
    /// Create a new shared refresh status.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A cycle has been triggered. Returns its 1-based sequence number.
    pub fn cycle_started(&self) -> u64 {
        match self.inner.write() {
            Ok(mut inner) => {
                inner.cycles_started += 1;
                inner.in_flight += 1;
                inner.cycles_started
            }
            Err(_) => 0,
        }
    }

    /// A cycle reconciled `markers` markers.
    pub fn cycle_succeeded(&self, markers: usize) {
        if let Ok(mut inner) = self.inner.write() {
            inner.cycles_succeeded += 1;
            inner.in_flight = inner.in_flight.saturating_sub(1);
            inner.markers = markers;
            inner.last_success = Some(Local::now());
            inner.last_cycle_failed = false;
        }
    }

    /// A cycle was abandoned. The displayed marker count is left unchanged.
    pub fn cycle_failed(&self, error: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.cycles_failed += 1;
            inner.in_flight = inner.in_flight.saturating_sub(1);
            inner.last_error = Some(error.into());
            inner.last_cycle_failed = true;
        }
    }

    /// The loop has exited; cycles still in flight were aborted.
    pub fn mark_stopped(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.stopped = true;
            inner.in_flight = 0;
        }
    }

    /// Get a snapshot of the current status.
    pub fn snapshot(&self) -> RefreshSnapshot {
        self.inner.read().map(|r| r.clone()).unwrap_or_default()
    }
}
