//! Memory store module.
//!
//! This module contains the in-memory store implementation, mostly
//! useful for tests and short-lived embeddings.

use crate::{
    store::{Result, Store},
    ConnectionStats, Logs,
};

/// Represents the in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    stats: Option<ConnectionStats>,
    logs: Logs,
    marker: Option<(i64, i64)>,
    last_check: Option<i64>,
}

impl Store for MemoryStore {
    fn stats(&mut self) -> Result<Option<ConnectionStats>> {
        Ok(self.stats.clone())
    }

    fn save_stats(&mut self, stats: &ConnectionStats) -> Result<()> {
        self.stats = Some(stats.clone());
        Ok(())
    }

    fn logs(&mut self) -> Result<Logs> {
        Ok(self.logs.clone())
    }

    fn save_logs(&mut self, logs: &Logs) -> Result<()> {
        self.logs = logs.clone();
        Ok(())
    }

    fn last_successful_check(&mut self, now: i64) -> Result<Option<i64>> {
        Ok(self
            .marker
            .and_then(|(stamp, expires_at)| (now <= expires_at).then(|| stamp)))
    }

    fn set_last_successful_check(&mut self, stamp: i64, expires_at: i64) -> Result<()> {
        self.marker = Some((stamp, expires_at));
        Ok(())
    }

    fn last_check(&mut self) -> Result<Option<i64>> {
        Ok(self.last_check)
    }

    fn set_last_check(&mut self, stamp: i64) -> Result<()> {
        self.last_check = Some(stamp);
        Ok(())
    }
}
