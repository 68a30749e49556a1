//! Formatting helpers and non-TUI output.

use std::time::Duration;

use chrono::Local;
use transitmap::refresh::RefreshSnapshot;

/// Format a duration as HH:MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Print a one-line status for headless mode.
pub fn print_simple_status(snapshot: &RefreshSnapshot) {
    println!(
        "[{}] {}",
        Local::now().format("%H:%M:%S"),
        snapshot.summary_line()
    );
    if snapshot.is_degraded() {
        if let Some(error) = &snapshot.last_error {
            println!("           last error: {}", error);
        }
    }
}
