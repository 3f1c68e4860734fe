//! Recorder module.
//!
//! This module combines store persistence with the log facade: every
//! counted event and activity entry is both persisted and emitted.

use chrono::Local;
use log::{error, info};

use crate::{
    store::{Result, Store},
    ConnectionEvent, ConnectionStats, LogEntry, LogLevel,
};

/// Records connection events and activity entries through a store.
pub struct Recorder<'a> {
    store: &'a mut dyn Store,
}

impl<'a> Recorder<'a> {
    pub fn new(store: &'a mut dyn Store) -> Self {
        Self { store }
    }

    /// Counts a connection event into the persisted stats.
    pub fn record(&mut self, event: ConnectionEvent) -> Result<()> {
        let now = Local::now().timestamp();
        let mut stats = self
            .store
            .stats()?
            .unwrap_or_else(|| ConnectionStats::new(now));
        stats.record(event, now);
        self.store.save_stats(&stats)
    }

    /// Appends an entry to the persisted activity log and emits it
    /// through the log facade.
    pub fn log<M: ToString>(&mut self, level: LogLevel, message: M) -> Result<()> {
        let message = message.to_string();
        match level {
            LogLevel::Error => error!("{}", message),
            LogLevel::Success | LogLevel::Info => info!("{}", message),
        }

        let mut logs = self.store.logs()?;
        logs.push_entry(LogEntry::new(level, &message));
        self.store.save_logs(&logs)
    }
}
