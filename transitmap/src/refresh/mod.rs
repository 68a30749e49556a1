//! Periodic feed refresh.
//!
//! ```text
//! RefreshScheduler::run(cancel)
//!     │  tick (immediately, then every interval)
//!     ├── FeedFetcher::fetch()          → Vec<VehicleRecord> | FetchError
//!     ├── MarkerReconciler::reconcile() → MapContext.layer.replace_markers()
//!     └── SharedRefreshStatus           ← read by the dashboard
//! ```

mod scheduler;
mod status;

pub use scheduler::{
    CycleOutcome, OverlapPolicy, RefreshConfig, RefreshScheduler, DEFAULT_REFRESH_INTERVAL_MS,
};
pub use status::{RefreshSnapshot, SchedulerState, SharedRefreshStatus};
