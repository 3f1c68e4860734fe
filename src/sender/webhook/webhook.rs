//! Webhook module.
//!
//! This module contains the representation of the webhook ticket
//! sender.

use log::{debug, trace};
use reqwest::{
    blocking::{Client, ClientBuilder},
    header::{HeaderMap, HeaderValue, ACCEPT},
};
use std::time::Duration;

use crate::{DispatchResult, TicketPayload, TicketSender, WebhookConfig};

const USER_AGENT: &str = concat!("Mail2Ticket-EmailParser-Rust/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);
const PROBE_ECHO_LEN: usize = 200;

/// Represents the webhook ticket sender.
pub struct WebhookSender {
    config: WebhookConfig,
    client: Option<Client>,
}

impl WebhookSender {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    fn client(&mut self) -> reqwest::Result<&Client> {
        if let Some(ref client) = self.client {
            Ok(client)
        } else {
            let mut headers = HeaderMap::new();
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

            self.client = Some(
                ClientBuilder::new()
                    .timeout(TIMEOUT)
                    .user_agent(USER_AGENT)
                    .default_headers(headers)
                    .build()?,
            );

            Ok(self.client.as_ref().unwrap())
        }
    }

    fn post(&mut self, ticket: &TicketPayload) -> reqwest::Result<(u16, String)> {
        debug!("posting ticket to {}", self.config.url);
        trace!("ticket payload: {:?}", ticket);

        let url = self.config.url.clone();
        let response = self.client()?.post(&url).json(ticket).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok((status, body))
    }
}

impl TicketSender for WebhookSender {
    fn send(&mut self, ticket: &TicketPayload) -> DispatchResult {
        match self.post(ticket) {
            Ok((200, _)) => DispatchResult::ok("Ticket created"),
            Ok((status, body)) => {
                DispatchResult::err(format!("Webhook status {}: {}", status, body))
            }
            Err(err) => DispatchResult::err(format!("Webhook failed: {}", err)),
        }
    }

    fn probe(&mut self) -> DispatchResult {
        match self.post(&TicketPayload::sample()) {
            Ok((200, body)) => {
                let echo: String = body.chars().take(PROBE_ECHO_LEN).collect();
                DispatchResult::ok(format!("Webhook test successful! Response: {}", echo))
            }
            Ok((status, body)) => {
                DispatchResult::err(format!("Webhook status {}: {}", status, body))
            }
            Err(err) => DispatchResult::err(format!("Webhook failed: {}", err)),
        }
    }
}
