//! Envelope module.
//!
//! This module contains the representation of the message subset the
//! pipeline needs: who sent the message and what it is about.

/// Represents the sender of a message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mailbox {
    /// Represents the display name.
    pub name: Option<String>,
    /// Represents the email address.
    pub addr: String,
}

impl Mailbox {
    pub fn new<N, A>(name: Option<N>, address: A) -> Self
    where
        N: ToString,
        A: ToString,
    {
        Self {
            name: name.map(|name| name.to_string()),
            addr: address.to_string(),
        }
    }

    pub fn new_nameless<A>(address: A) -> Self
    where
        A: ToString,
    {
        Self {
            name: None,
            addr: address.to_string(),
        }
    }
}

/// Represents the message envelope. The envelope is just a message
/// subset, enough to build a ticket out of it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Envelope {
    /// Represents the message sequence number within the selected
    /// mailbox.
    pub seq: u32,
    /// Represents the first sender.
    pub from: Mailbox,
    /// Represents the Subject header, RFC 2047 decoded.
    pub subject: String,
}
