//! Backend module.
//!
//! This module exposes the traits the check pipeline runs against,
//! which can be used to plug in custom mailbox implementations.

use std::result;

use thiserror::Error;

use crate::{backend, BodyStructure, Envelope};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ImapBackendError(#[from] backend::imap::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the message counters of a mailbox.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MailboxStatus {
    /// Represents the total amount of messages.
    pub messages: u32,

    /// Represents the amount of unseen messages.
    pub unseen: usize,
}

/// Represents an open session on a mailbox.
pub trait MailboxBackend {
    /// Lists sequence numbers of unseen messages, in ascending order.
    fn search_unseen(&mut self) -> Result<Vec<u32>>;

    /// Gets the envelope of the given message.
    fn fetch_envelope(&mut self, seq: u32) -> Result<Envelope>;

    /// Gets the body structure of the given message.
    fn fetch_structure(&mut self, seq: u32) -> Result<BodyStructure>;

    /// Gets the raw content of one body section of the given message,
    /// without marking it seen. An absent section yields an empty
    /// content.
    fn fetch_part(&mut self, seq: u32, part_number: usize) -> Result<Vec<u8>>;

    /// Adds the Seen flag to the given message.
    fn add_seen_flag(&mut self, seq: u32) -> Result<()>;

    /// Gets the mailbox counters.
    fn status(&mut self) -> Result<MailboxStatus>;

    /// Closes the session.
    fn close(&mut self) -> Result<()>;
}

/// Opens sessions on a mailbox.
pub trait MailboxConnector {
    fn connect(&self) -> Result<Box<dyn MailboxBackend>>;
}
