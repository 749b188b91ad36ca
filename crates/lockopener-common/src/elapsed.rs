//! Human-readable "time since created" rendering.

use chrono::{DateTime, Utc};

/// Whole seconds between `created_at` and `now`, clamped at zero.
///
/// A creation time in the future (clock skew between the backend and this
/// machine) reads as zero rather than a negative duration.
pub fn elapsed_seconds(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - created_at).num_seconds().max(0) as u64
}

/// Render a duration as `"1h 2m 3s"`, `"2m 3s"` or `"3s"`.
///
/// Units above the largest non-zero unit are omitted; lower units are always
/// shown once a higher one is.
pub fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

pub fn format_elapsed(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_seconds(elapsed_seconds(created_at, now))
}
