//! Connection stats module.
//!
//! This module contains the rolling connection counters kept across
//! checks.

use serde::{Deserialize, Serialize};

/// Window after which the counters reset, in seconds (7 days).
pub const RESET_WINDOW_SECS: i64 = 604_800;

/// Represents a counted connection event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectionEvent {
    /// A connection is about to be attempted.
    Attempt,
    /// A run completed past login.
    Success,
    /// A connection or run level failure.
    Failure,
}

/// Represents the rolling connection counters.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConnectionStats {
    /// Counts attempted connections.
    pub total_connections: u64,
    /// Counts runs completed past login.
    pub successful_connections: u64,
    /// Counts connection and run level failures.
    pub failed_connections: u64,
    /// Represents the last counter reset, in epoch seconds.
    pub last_reset: i64,
}

impl ConnectionStats {
    pub fn new(now: i64) -> Self {
        Self {
            total_connections: 0,
            successful_connections: 0,
            failed_connections: 0,
            last_reset: now,
        }
    }

    /// Counts an event. A window whose last reset is more than seven
    /// days old is zeroed first, so the event lands on the fresh
    /// counters.
    pub fn record(&mut self, event: ConnectionEvent, now: i64) {
        if now - self.last_reset > RESET_WINDOW_SECS {
            *self = Self::new(now);
        }

        match event {
            ConnectionEvent::Attempt => self.total_connections += 1,
            ConnectionEvent::Success => self.successful_connections += 1,
            ConnectionEvent::Failure => self.failed_connections += 1,
        }
    }

    /// Computes the share of successful connections as a percentage
    /// rounded to one decimal.
    pub fn success_rate(&self) -> f64 {
        if self.total_connections == 0 {
            return 0.0;
        }

        let rate = self.successful_connections as f64 / self.total_connections as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }
}
