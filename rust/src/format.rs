//! Clock display helpers.

use chrono::Duration;

/// Format whole seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so 6000 seconds prints as `100:00`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a duration as `MM:SS`, clamping negative durations to zero.
pub fn format_duration(duration: Duration) -> String {
    format_time(duration.num_seconds().max(0) as u64)
}
