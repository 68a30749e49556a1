//! Terminal UI for transitmap.
//!
//! Provides a real-time dashboard showing the refresh loop status and the
//! current vehicle markers.

pub mod dashboard;
pub mod widgets;

pub use dashboard::{Dashboard, DashboardConfig, DashboardEvent};
