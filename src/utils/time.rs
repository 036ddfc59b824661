//! Timestamps and time-derived ids.

use chrono::{DateTime, Local};

/// Format a local time as `YYYY-MM-DDTHH:MM:SS.ffffff`
pub fn format_iso(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Id for a manually added memory: `manual-YYYYMMDD-HHMMSS`
pub fn manual_memory_id(at: &DateTime<Local>) -> String {
    format!("manual-{}", at.format("%Y%m%d-%H%M%S"))
}
