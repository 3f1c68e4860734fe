//! IMAP backend config module.
//!
//! This module contains the representation of the IMAP backend
//! configuration of the user mailbox.

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Represents the IMAP backend config.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ImapConfig {
    /// Represents the IMAP server host.
    pub host: String,
    /// Represents the IMAP server port.
    pub port: u16,
    /// Represents the IMAP server login.
    pub login: String,
    /// Represents the IMAP server password.
    pub passwd: String,
    /// Represents the socket read timeout, in seconds.
    pub timeout: Option<u64>,
    /// Accepts invalid certificates and hostnames during the TLS
    /// handshake. Defaults to true.
    pub insecure: Option<bool>,
}

impl ImapConfig {
    /// Gets the socket read timeout.
    pub fn timeout(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Gets the certificate trust option.
    pub fn insecure(&self) -> bool {
        self.insecure.unwrap_or(true)
    }
}
