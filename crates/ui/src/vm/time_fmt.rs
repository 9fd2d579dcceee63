use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Wall time between two instants, e.g. `2m 05s`. Negative spans read as zero.
#[must_use]
pub fn format_elapsed(started: DateTime<Utc>, finished: DateTime<Utc>) -> String {
    let seconds = (finished - started).num_seconds().max(0);
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    if minutes == 0 {
        format!("{remainder}s")
    } else {
        format!("{minutes}m {remainder:02}s")
    }
}
