//! Store module.
//!
//! This module contains the persistence port the pipeline keeps its
//! state behind: connection counters, activity log and check markers.

use std::result;

use thiserror::Error;

use crate::{ConnectionStats, Logs};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot encode store value")]
    EncodeValueError(#[source] serde_json::Error),
    #[error("cannot decode store value")]
    DecodeValueError(#[source] serde_json::Error),

    #[cfg(feature = "sqlite-store")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the persistence port of the pipeline.
pub trait Store {
    /// Reads the connection counters.
    fn stats(&mut self) -> Result<Option<ConnectionStats>>;

    /// Writes the connection counters.
    fn save_stats(&mut self, stats: &ConnectionStats) -> Result<()>;

    /// Reads the activity log.
    fn logs(&mut self) -> Result<Logs>;

    /// Writes the activity log.
    fn save_logs(&mut self, logs: &Logs) -> Result<()>;

    /// Reads the last successful check marker. An expired marker
    /// reads as `None`.
    fn last_successful_check(&mut self, now: i64) -> Result<Option<i64>>;

    /// Writes the last successful check marker together with its
    /// expiry.
    fn set_last_successful_check(&mut self, stamp: i64, expires_at: i64) -> Result<()>;

    /// Reads the last check timestamp.
    fn last_check(&mut self) -> Result<Option<i64>>;

    /// Writes the last check timestamp.
    fn set_last_check(&mut self, stamp: i64) -> Result<()>;
}
