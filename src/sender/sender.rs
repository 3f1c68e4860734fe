//! Sender module.
//!
//! This module contains the ticket sender interface.

use crate::TicketPayload;

/// Represents the outcome of a ticket dispatch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchResult {
    /// Represents the dispatch success.
    pub success: bool,
    /// Represents the human readable outcome message.
    pub message: String,
}

impl DispatchResult {
    pub fn ok<M: ToString>(message: M) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    pub fn err<M: ToString>(message: M) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// Sends ticket payloads to the help desk.
pub trait TicketSender {
    /// Sends the given ticket payload.
    fn send(&mut self, ticket: &TicketPayload) -> DispatchResult;

    /// Sends a canned payload to check connectivity.
    fn probe(&mut self) -> DispatchResult;
}
