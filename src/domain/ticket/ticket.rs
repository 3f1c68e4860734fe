//! Ticket module.
//!
//! This module contains the representation of the ticket payload
//! posted to the webhook.

use serde::Serialize;

use crate::{Envelope, Mailbox};

/// Title given to tickets built from messages without a subject.
const NO_SUBJECT: &str = "No Subject";

/// Priority given to every ticket.
const DEFAULT_PRIORITY: &str = "Normal";

/// Represents the requester a ticket is opened for.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Requester {
    /// Represents the first name, the first word of the sender
    /// display name.
    pub first_name: String,
    /// Represents the last name, the remaining words of the sender
    /// display name.
    pub last_name: String,
    /// Represents the email address.
    pub email: String,
}

impl Requester {
    /// Builds the requester out of a message sender. A sender without
    /// a display name yields empty name parts.
    pub fn from_mailbox(mailbox: &Mailbox) -> Self {
        let (first_name, last_name) = split_name(mailbox.name.as_deref().unwrap_or_default());
        Self {
            first_name,
            last_name,
            email: mailbox.addr.clone(),
        }
    }
}

/// Splits a display name into first and last name: the first word
/// becomes the first name, everything after it the last name.
pub fn split_name(name: &str) -> (String, String) {
    let name = name.trim();
    if name.is_empty() {
        return (String::new(), String::new());
    }

    let mut words = name.split(' ');
    let first_name = words.next().unwrap_or_default().to_string();
    let rest: Vec<&str> = words.collect();
    let last_name = if rest.is_empty() {
        String::new()
    } else {
        rest.join(" ")
    };

    (first_name, last_name)
}

/// Represents the ticket payload posted to the webhook.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TicketPayload {
    /// Represents the ticket title, the decoded message subject.
    pub title: String,
    /// Represents the ticket content, the extracted message body.
    pub content: String,
    /// Represents the ticket priority, always "Normal".
    pub priority: String,
    /// Represents the requester the ticket is opened for.
    pub sender: Requester,
}

impl TicketPayload {
    /// Builds the ticket payload out of a decoded envelope and an
    /// extracted body. A missing subject falls back to "No Subject".
    pub fn from_email(envelope: &Envelope, content: String) -> Self {
        let title = if envelope.subject.is_empty() {
            NO_SUBJECT.into()
        } else {
            envelope.subject.clone()
        };

        Self {
            title,
            content,
            priority: DEFAULT_PRIORITY.into(),
            sender: Requester::from_mailbox(&envelope.from),
        }
    }

    /// Builds the fixed payload used by the webhook self test.
    pub fn sample() -> Self {
        Self {
            title: "Test Ticket - Mail2Ticket Email Parser".into(),
            content: "This is a test ticket to verify webhook connectivity.".into(),
            priority: DEFAULT_PRIORITY.into(),
            sender: Requester {
                first_name: "Test".into(),
                last_name: "User".into(),
                email: "test@example.com".into(),
            },
        }
    }
}
