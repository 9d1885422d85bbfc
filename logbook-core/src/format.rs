//! Formatting helpers shared by renderers.

use crate::timestamp::LocalTime;

/// Format a byte count as `B`, `KB` or `MB` with one decimal.
pub fn format_file_size(size_bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if size_bytes < KIB {
        format!("{} B", size_bytes)
    } else if size_bytes < MIB {
        format!("{:.1} KB", size_bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", size_bytes as f64 / MIB as f64)
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`, or `unknown time`.
pub fn format_timestamp(ts: LocalTime) -> String {
    ts.to_string()
}
