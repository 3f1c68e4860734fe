//! SQLite store module.
//!
//! This module contains the durable store implementation backed by
//! SQLite.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    store::{Error, Result, Store},
    ConnectionStats, Logs,
};

const CREATE_STATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS parser_state (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    expires_at INTEGER
)";

const UPSERT_STATE: &str = "
INSERT INTO parser_state (key, value, expires_at)
VALUES (?1, ?2, ?3)
ON CONFLICT (key) DO UPDATE SET value = ?2, expires_at = ?3
";

const SELECT_STATE: &str = "SELECT value, expires_at FROM parser_state WHERE key = ?1";

const STATS_KEY: &str = "connection_stats";
const LOGS_KEY: &str = "activity_logs";
const MARKER_KEY: &str = "last_successful_check";
const LAST_CHECK_KEY: &str = "last_check";

/// Represents the durable SQLite store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute(CREATE_STATE_TABLE, [])?;

        Ok(Self { conn })
    }

    /// Reads a keyed value. When `now` is given, a row whose expiry
    /// lies in the past reads as `None`.
    fn read<T: DeserializeOwned>(&self, key: &str, now: Option<i64>) -> Result<Option<T>> {
        let row: Option<(String, Option<i64>)> = self
            .conn
            .query_row(SELECT_STATE, params![key], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()?;

        match row {
            None => Ok(None),
            Some((value, expires_at)) => {
                if let (Some(now), Some(expires_at)) = (now, expires_at) {
                    if expires_at < now {
                        return Ok(None);
                    }
                }

                let value = serde_json::from_str(&value).map_err(Error::DecodeValueError)?;
                Ok(Some(value))
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T, expires_at: Option<i64>) -> Result<()> {
        let value = serde_json::to_string(value).map_err(Error::EncodeValueError)?;
        self.conn.execute(UPSERT_STATE, params![key, value, expires_at])?;

        Ok(())
    }
}

impl Store for SqliteStore {
    fn stats(&mut self) -> Result<Option<ConnectionStats>> {
        self.read(STATS_KEY, None)
    }

    fn save_stats(&mut self, stats: &ConnectionStats) -> Result<()> {
        self.write(STATS_KEY, stats, None)
    }

    fn logs(&mut self) -> Result<Logs> {
        Ok(self.read(LOGS_KEY, None)?.unwrap_or_default())
    }

    fn save_logs(&mut self, logs: &Logs) -> Result<()> {
        self.write(LOGS_KEY, logs, None)
    }

    fn last_successful_check(&mut self, now: i64) -> Result<Option<i64>> {
        self.read(MARKER_KEY, Some(now))
    }

    fn set_last_successful_check(&mut self, stamp: i64, expires_at: i64) -> Result<()> {
        self.write(MARKER_KEY, &stamp, Some(expires_at))
    }

    fn last_check(&mut self) -> Result<Option<i64>> {
        self.read(LAST_CHECK_KEY, None)
    }

    fn set_last_check(&mut self, stamp: i64) -> Result<()> {
        self.write(LAST_CHECK_KEY, &stamp, None)
    }
}

#[cfg(test)]
mod test_sqlite_store {
    use super::SqliteStore;
    use crate::{ConnectionEvent, ConnectionStats, LogEntry, LogLevel, Logs, Store};

    #[test]
    fn test_values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.sqlite");

        let mut stats = ConnectionStats::new(1_000);
        stats.record(ConnectionEvent::Attempt, 1_000);

        let mut logs = Logs::default();
        logs.push_entry(LogEntry::new(LogLevel::Success, "Processed 2 emails"));

        {
            let mut store = SqliteStore::new(&path).unwrap();
            store.save_stats(&stats).unwrap();
            store.save_logs(&logs).unwrap();
            store.set_last_check(1_000).unwrap();
        }

        let mut store = SqliteStore::new(&path).unwrap();
        assert_eq!(Some(stats), store.stats().unwrap());
        assert_eq!(logs, store.logs().unwrap());
        assert_eq!(Some(1_000), store.last_check().unwrap());
    }

    #[test]
    fn test_marker_expires() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteStore::new(dir.path().join("state.sqlite")).unwrap();

        assert_eq!(None, store.last_successful_check(1_000).unwrap());

        store.set_last_successful_check(1_000, 1_300).unwrap();
        assert_eq!(Some(1_000), store.last_successful_check(1_299).unwrap());
        assert_eq!(Some(1_000), store.last_successful_check(1_300).unwrap());
        assert_eq!(None, store.last_successful_check(1_301).unwrap());
    }

    #[test]
    fn test_overwrites_keep_a_single_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteStore::new(dir.path().join("state.sqlite")).unwrap();

        store.set_last_check(1).unwrap();
        store.set_last_check(2).unwrap();
        assert_eq!(Some(2), store.last_check().unwrap());
    }

    #[test]
    fn test_missing_logs_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteStore::new(dir.path().join("state.sqlite")).unwrap();

        assert!(store.logs().unwrap().is_empty());
    }
}
