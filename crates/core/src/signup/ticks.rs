//! High-resolution clock readings used as row-key uniqueness tokens.
//!
//! A tick is 100 nanoseconds, counted from 0001-01-01T00:00:00 UTC.

use chrono::{DateTime, Utc};

/// Number of ticks in one second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Tick count at 1970-01-01T00:00:00 UTC.
pub const TICKS_AT_UNIX_EPOCH: i64 = 621_355_968_000_000_000;

/// Converts an instant into its tick count.
///
/// Counts are exact up to roughly year 29228; later instants clamp to
/// `i64::MAX` and earlier-than-representable ones to `i64::MIN`.
pub fn ticks(at: DateTime<Utc>) -> i64 {
    at.timestamp()
        .saturating_mul(TICKS_PER_SECOND)
        .saturating_add(i64::from(at.timestamp_subsec_nanos() / 100))
        .saturating_add(TICKS_AT_UNIX_EPOCH)
}
