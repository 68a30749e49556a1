//! Dashboard widgets for the TUI.
//!
//! - `RefreshStatusWidget` - scheduler state, cycle counters, last error
//! - `VehicleMapWidget` - braille canvas of marker positions
//! - `VehicleListWidget` - marker labels sorted by line

mod refresh_status;
mod vehicle_list;
mod vehicle_map;

pub use refresh_status::RefreshStatusWidget;
pub use vehicle_list::VehicleListWidget;
pub use vehicle_map::VehicleMapWidget;
