//! Parser config module.
//!
//! This module contains the representation of the email parser
//! configuration.

use std::result;

use thiserror::Error;

use crate::{ImapConfig, WebhookConfig};

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing config: {0}")]
    MissingConfigError(&'static str),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the email parser configuration.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Config {
    /// Enables the parser. A disabled parser refuses to run checks.
    pub enabled: bool,
    /// Represents the mailbox login.
    pub email: String,
    /// Represents the mailbox password.
    pub password: String,
    /// Represents the IMAP server host.
    pub imap_host: String,
    /// Represents the IMAP server port.
    pub imap_port: Option<u16>,
    /// Represents the socket timeout in seconds.
    pub connection_timeout: Option<u64>,
    /// Caps the number of messages handled per check.
    pub max_emails_per_check: Option<usize>,
    /// Represents the pause between two processed messages, in
    /// milliseconds. Zero disables the pause.
    pub process_delay: Option<u64>,
    /// Represents the ticket webhook endpoint.
    pub webhook_url: String,
    /// Enables verbose payload logging.
    pub debug: bool,
}

impl Config {
    /// Checks that every required field is set. The first missing one
    /// is reported.
    pub fn validate(&self) -> Result<()> {
        if self.email.is_empty() {
            return Err(Error::MissingConfigError("email"));
        }
        if self.password.is_empty() {
            return Err(Error::MissingConfigError("password"));
        }
        if self.imap_host.is_empty() {
            return Err(Error::MissingConfigError("imap_host"));
        }
        if self.webhook_url.is_empty() {
            return Err(Error::MissingConfigError("webhook_url"));
        }
        Ok(())
    }

    /// Gets the IMAP server port. An unset or zero port falls back to
    /// the default IMAPS port.
    pub fn port(&self) -> u16 {
        match self.imap_port {
            Some(port) if port > 0 => port,
            _ => 993,
        }
    }

    /// Gets the socket timeout in seconds. An unset or zero timeout
    /// falls back to 30s.
    pub fn timeout(&self) -> u64 {
        match self.connection_timeout {
            Some(timeout) if timeout > 0 => timeout,
            _ => 30,
        }
    }

    /// Gets the maximum number of messages handled per check. An
    /// unset or zero value falls back to 10.
    pub fn max_emails(&self) -> usize {
        match self.max_emails_per_check {
            Some(max) if max > 0 => max,
            _ => 10,
        }
    }

    /// Gets the pause between two processed messages, in
    /// milliseconds. An unset value falls back to 500ms; zero is
    /// honored.
    pub fn process_delay(&self) -> u64 {
        self.process_delay.unwrap_or(500)
    }

    /// Builds the IMAP session config out of the parser config.
    pub fn to_imap_config(&self) -> ImapConfig {
        ImapConfig {
            host: self.imap_host.clone(),
            port: self.port(),
            login: self.email.clone(),
            passwd: self.password.clone(),
            timeout: Some(self.timeout()),
            ..ImapConfig::default()
        }
    }

    /// Builds the webhook sender config out of the parser config.
    pub fn to_webhook_config(&self) -> WebhookConfig {
        WebhookConfig {
            url: self.webhook_url.clone(),
        }
    }
}
