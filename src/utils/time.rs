//! Time utilities for relay timestamps
//!
//! Relay timestamps are nanoseconds since the Unix epoch carried as i64.

use chrono::{DateTime, Utc};

pub const NANOS_PER_MILLI: i64 = 1_000_000;

/// Current wall-clock time in nanoseconds
///
/// Used as the key fallback for messages that arrive without a timestamp.
pub fn wall_clock_nanos() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_millis().saturating_mul(NANOS_PER_MILLI))
}

/// Current wall-clock time in milliseconds, the unit native offers carry
pub fn wall_clock_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a nanosecond timestamp to a UTC `YYYY-MM-DD HH:MM:SS` string
///
/// # Examples
/// ```
/// use relay_offers::utils::time::format_timestamp_nanos;
/// assert_eq!(format_timestamp_nanos(0), "1970-01-01 00:00:00");
/// assert_eq!(format_timestamp_nanos(1_700_000_000_000_000_000), "2023-11-14 22:13:20");
/// ```
pub fn format_timestamp_nanos(timestamp_nanos: i64) -> String {
    DateTime::<Utc>::from_timestamp_nanos(timestamp_nanos)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
