//! Check module.
//!
//! This module contains the checker, which drives one full
//! mailbox-to-ticket pass: search unseen messages, turn each of them
//! into a ticket payload, dispatch it and mark the message seen.

use chrono::Local;
use log::debug;
use std::{result, thread, time::Duration};
use thiserror::Error;

use crate::{
    backend, email, store, throttle, Config, ConnectionEvent, DispatchResult, LogLevel, Logs,
    MailboxBackend, MailboxConnector, MailboxStatus, Recorder, Store, TicketPayload, TicketSender,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    BackendError(#[from] backend::Error),
    #[error(transparent)]
    StoreError(#[from] store::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the outcome of one checker operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckOutcome {
    /// Represents the operation success.
    pub success: bool,
    /// Represents the human readable outcome message.
    pub message: String,
}

impl CheckOutcome {
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

enum Batch {
    Empty,
    Processed {
        processed: usize,
        errors: usize,
        remaining: usize,
    },
}

fn summary(processed: usize, errors: usize, remaining: usize) -> String {
    let mut summary = format!("Processed {} emails", processed);
    if errors > 0 {
        summary.push_str(&format!(", {} errors", errors));
    }
    if remaining > 0 {
        summary.push_str(&format!(", {} remaining", remaining));
    }
    summary
}

/// Represents the checker, wired on the mailbox, ticket sender and
/// store ports.
pub struct Checker<'a> {
    config: &'a Config,
    store: &'a mut dyn Store,
    connector: &'a dyn MailboxConnector,
    sender: &'a mut dyn TicketSender,
}

impl<'a> Checker<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a mut dyn Store,
        connector: &'a dyn MailboxConnector,
        sender: &'a mut dyn TicketSender,
    ) -> Self {
        Self {
            config,
            store,
            connector,
            sender,
        }
    }

    fn record(&mut self, event: ConnectionEvent) -> Result<()> {
        Recorder::new(self.store).record(event)?;
        Ok(())
    }

    fn log<M: ToString>(&mut self, level: LogLevel, message: M) -> Result<()> {
        Recorder::new(self.store).log(level, message)?;
        Ok(())
    }

    /// Runs one full check pass on the mailbox.
    pub fn check(&mut self) -> Result<CheckOutcome> {
        debug!("starting mailbox check");

        if !self.config.enabled {
            return Ok(CheckOutcome::err("Email parser is disabled."));
        }

        if let Err(err) = self.config.validate() {
            let message = err.to_string();
            self.log(LogLevel::Error, &message)?;
            return Ok(CheckOutcome::err(message));
        }

        let now = Local::now().timestamp();
        self.store.set_last_check(now)?;

        let marker = self.store.last_successful_check(now)?;
        if throttle::throttled(marker, now) {
            debug!("skipping check, last successful one is too recent");
            return Ok(CheckOutcome::ok("Throttled - recent check detected"));
        }

        self.record(ConnectionEvent::Attempt)?;

        let mut backend = match self.connector.connect() {
            Ok(backend) => backend,
            Err(err) => {
                self.record(ConnectionEvent::Failure)?;
                let message = format!("Connection failed: {}", err);
                self.log(LogLevel::Error, &message)?;
                return Ok(CheckOutcome::err(message));
            }
        };

        let batch = self.run_batch(backend.as_mut());
        let closed = backend.close();

        let batch = match (batch, closed) {
            (Ok(batch), Ok(())) => batch,
            (Err(Error::BackendError(err)), _) => return self.check_failed(err),
            (Err(err), _) => return Err(err),
            (Ok(_), Err(err)) => return self.check_failed(err),
        };

        self.record(ConnectionEvent::Success)?;
        let now = Local::now().timestamp();
        self.store
            .set_last_successful_check(now, throttle::marker_expiry(now))?;

        match batch {
            Batch::Empty => {
                let message = "No unread emails found.";
                self.log(LogLevel::Info, message)?;
                Ok(CheckOutcome::ok(message))
            }
            Batch::Processed {
                processed,
                errors,
                remaining,
            } => {
                let message = summary(processed, errors, remaining);
                self.log(LogLevel::Success, &message)?;
                Ok(CheckOutcome::ok(message))
            }
        }
    }

    fn run_batch(&mut self, backend: &mut dyn MailboxBackend) -> Result<Batch> {
        let seqs = backend.search_unseen()?;
        if seqs.is_empty() {
            return Ok(Batch::Empty);
        }

        let total = seqs.len();
        let max = self.config.max_emails();
        let mut processed = 0;
        let mut errors = 0;

        for seq in seqs.into_iter().take(max) {
            match self.process_email(backend, seq) {
                Ok(result) if result.success => {
                    processed += 1;
                    if let Err(err) = backend.add_seen_flag(seq) {
                        errors += 1;
                        self.log(LogLevel::Error, format!("Error email ID {}: {}", seq, err))?;
                        continue;
                    }
                    thread::sleep(Duration::from_millis(self.config.process_delay()));
                }
                Ok(result) => {
                    errors += 1;
                    self.log(
                        LogLevel::Error,
                        format!("Failed email ID {}: {}", seq, result.message),
                    )?;
                }
                Err(Error::BackendError(err)) => {
                    errors += 1;
                    self.log(LogLevel::Error, format!("Error email ID {}: {}", seq, err))?;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Batch::Processed {
            processed,
            errors,
            remaining: total.saturating_sub(max),
        })
    }

    fn process_email(
        &mut self,
        backend: &mut dyn MailboxBackend,
        seq: u32,
    ) -> Result<DispatchResult> {
        let envelope = backend.fetch_envelope(seq)?;
        let structure = backend.fetch_structure(seq)?;
        let body = email::extract_body(&structure, |part| backend.fetch_part(seq, part))?;

        let ticket = TicketPayload::from_email(&envelope, body);
        if self.config.debug {
            debug!("ticket payload: {:?}", ticket);
        }

        let result = self.sender.send(&ticket);
        if result.success {
            self.log(
                LogLevel::Success,
                format!(
                    "Created ticket: {} from {}",
                    ticket.title, envelope.from.addr
                ),
            )?;
        }

        Ok(result)
    }

    fn check_failed(&mut self, err: backend::Error) -> Result<CheckOutcome> {
        self.record(ConnectionEvent::Failure)?;
        let message = format!("Check error: {}", err);
        self.log(LogLevel::Error, &message)?;
        Ok(CheckOutcome::err(message))
    }

    /// Checks that the mailbox can be reached with the current config.
    pub fn test_connection(&mut self) -> Result<CheckOutcome> {
        self.record(ConnectionEvent::Attempt)?;

        match self.test_session() {
            Ok(status) => {
                self.record(ConnectionEvent::Success)?;
                let message = format!(
                    "Email connection successful! Found {} total messages, {} unread.",
                    status.messages, status.unseen
                );
                self.log(LogLevel::Success, &message)?;
                Ok(CheckOutcome::ok(message))
            }
            Err(err) => {
                self.record(ConnectionEvent::Failure)?;
                let message = format!("Failed to connect: {}", err);
                self.log(LogLevel::Error, &message)?;
                Ok(CheckOutcome::err(message))
            }
        }
    }

    fn test_session(&self) -> backend::Result<MailboxStatus> {
        let mut backend = self.connector.connect()?;
        let status = backend.status();
        let closed = backend.close();

        let status = status?;
        closed?;

        Ok(status)
    }

    /// Checks that the ticket webhook accepts a canned payload.
    pub fn test_webhook(&mut self) -> Result<CheckOutcome> {
        let result = self.sender.probe();
        let level = if result.success {
            LogLevel::Success
        } else {
            LogLevel::Error
        };
        self.log(level, &result.message)?;

        Ok(CheckOutcome {
            success: result.success,
            message: result.message,
        })
    }

    /// Truncates the persisted activity log.
    pub fn clear_logs(&mut self) -> Result<()> {
        self.store.save_logs(&Logs::default())?;
        Ok(())
    }
}
