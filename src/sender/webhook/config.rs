//! Webhook config module.
//!
//! This module contains the representation of the webhook sender
//! configuration.

/// Represents the webhook sender config.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WebhookConfig {
    /// Represents the help desk incoming webhook endpoint.
    pub url: String,
}
