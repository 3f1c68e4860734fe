//! Throttle module.
//!
//! This module contains the guard that keeps close check runs from
//! hammering the mailbox.

/// Minimum interval between two check runs, in seconds.
pub const MIN_CHECK_INTERVAL_SECS: i64 = 60;

/// Lifetime of the last successful check marker, in seconds. An
/// expired marker no longer throttles anything.
pub const MARKER_TTL_SECS: i64 = 300;

/// Tells whether a check run should be skipped given the last
/// successful check marker.
pub fn throttled(last_successful_check: Option<i64>, now: i64) -> bool {
    match last_successful_check {
        Some(stamp) => now - stamp < MIN_CHECK_INTERVAL_SECS,
        None => false,
    }
}

/// Computes the expiry of a marker written at `now`.
pub fn marker_expiry(now: i64) -> i64 {
    now + MARKER_TTL_SECS
}
