//! Activity log module.
//!
//! This module contains the bounded activity log surfaced to
//! operators.

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the activity log.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Represents the severity of an activity log entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl From<&str> for LogLevel {
    fn from(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// Represents a single activity log entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Represents the local time of the entry, formatted
    /// `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    /// Represents the severity.
    pub level: LogLevel,
    /// Represents the message.
    pub message: String,
}

impl LogEntry {
    pub fn new<M: ToString>(level: LogLevel, message: M) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            level,
            message: message.to_string(),
        }
    }
}

/// Represents the bounded activity log, oldest entry first.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Logs(pub Vec<LogEntry>);

impl Logs {
    /// Appends an entry, evicting the oldest ones past the cap.
    pub fn push_entry(&mut self, entry: LogEntry) {
        self.0.push(entry);
        if self.0.len() > MAX_LOG_ENTRIES {
            let excess = self.0.len() - MAX_LOG_ENTRIES;
            self.0.drain(..excess);
        }
    }

    /// Returns the newest entries first, capped at `max`.
    pub fn recent(&self, max: usize) -> Vec<&LogEntry> {
        self.0.iter().rev().take(max).collect()
    }
}

impl Deref for Logs {
    type Target = Vec<LogEntry>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Logs {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<LogEntry> for Logs {
    fn from_iter<T: IntoIterator<Item = LogEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
