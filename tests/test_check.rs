use chrono::Local;
use std::{cell::RefCell, rc::Rc};

use mail2ticket::{
    backend::{self, imap},
    BodyStructure, CheckOutcome, Checker, Config, DispatchResult, Encoding, Envelope, LogLevel,
    Mailbox, MailboxBackend, MailboxConnector, MailboxStatus, MemoryStore, Part, Store,
    TicketPayload, TicketSender,
};

#[derive(Default)]
struct FakeMailboxState {
    unseen: Vec<u32>,
    seen: Vec<u32>,
    connects: usize,
    closes: usize,
    fail_search: bool,
    fail_status: bool,
    fail_envelope_of: Option<u32>,
}

struct FakeMailbox {
    state: Rc<RefCell<FakeMailboxState>>,
}

impl MailboxBackend for FakeMailbox {
    fn search_unseen(&mut self) -> backend::Result<Vec<u32>> {
        let state = self.state.borrow();
        if state.fail_search {
            return Err(imap::Error::FindMsgError(0).into());
        }
        Ok(state.unseen.clone())
    }

    fn fetch_envelope(&mut self, seq: u32) -> backend::Result<Envelope> {
        if self.state.borrow().fail_envelope_of == Some(seq) {
            return Err(imap::Error::GetEnvelopeError(seq).into());
        }
        Ok(Envelope {
            seq,
            from: Mailbox::new(Some("Jane Q Public"), format!("user{}@example.com", seq)),
            subject: format!("Help request {}", seq),
        })
    }

    fn fetch_structure(&mut self, _seq: u32) -> backend::Result<BodyStructure> {
        Ok(BodyStructure::Single(Part::new(
            "PLAIN",
            Encoding::SevenBit,
        )))
    }

    fn fetch_part(&mut self, seq: u32, _part_number: usize) -> backend::Result<Vec<u8>> {
        Ok(format!("I cannot log in. (message {})", seq).into_bytes())
    }

    fn add_seen_flag(&mut self, seq: u32) -> backend::Result<()> {
        self.state.borrow_mut().seen.push(seq);
        Ok(())
    }

    fn status(&mut self) -> backend::Result<MailboxStatus> {
        let state = self.state.borrow();
        if state.fail_status {
            return Err(imap::Error::FindMsgError(0).into());
        }
        Ok(MailboxStatus {
            messages: 5,
            unseen: state.unseen.len(),
        })
    }

    fn close(&mut self) -> backend::Result<()> {
        self.state.borrow_mut().closes += 1;
        Ok(())
    }
}

struct FakeConnector {
    state: Rc<RefCell<FakeMailboxState>>,
    fail: bool,
}

impl FakeConnector {
    fn new(unseen: Vec<u32>) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeMailboxState {
                unseen,
                ..FakeMailboxState::default()
            })),
            fail: false,
        }
    }
}

impl MailboxConnector for FakeConnector {
    fn connect(&self) -> backend::Result<Box<dyn MailboxBackend>> {
        self.state.borrow_mut().connects += 1;
        if self.fail {
            return Err(imap::Error::FindMsgError(0).into());
        }
        Ok(Box::new(FakeMailbox {
            state: Rc::clone(&self.state),
        }))
    }
}

#[derive(Default)]
struct FakeSender {
    sent: Vec<TicketPayload>,
    fail_on_call: Option<usize>,
}

impl TicketSender for FakeSender {
    fn send(&mut self, ticket: &TicketPayload) -> DispatchResult {
        self.sent.push(ticket.clone());
        if self.fail_on_call == Some(self.sent.len()) {
            DispatchResult::err("Webhook status 500: boom")
        } else {
            DispatchResult::ok("Ticket created")
        }
    }

    fn probe(&mut self) -> DispatchResult {
        DispatchResult::ok("Webhook test successful! Response: ok")
    }
}

fn config() -> Config {
    Config {
        enabled: true,
        email: "support@localhost".into(),
        password: "password".into(),
        imap_host: "localhost".into(),
        webhook_url: "http://localhost/webhook".into(),
        process_delay: Some(0),
        ..Config::default()
    }
}

fn check(
    config: &Config,
    store: &mut MemoryStore,
    connector: &FakeConnector,
    sender: &mut FakeSender,
) -> CheckOutcome {
    Checker::new(config, store, connector, sender)
        .check()
        .unwrap()
}

#[test]
fn test_check_refuses_disabled_parser() {
    let mut config = config();
    config.enabled = false;
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![1]);
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(!outcome.success);
    assert_eq!("Email parser is disabled.", outcome.message);

    // checking that nothing was attempted nor recorded
    assert_eq!(0, connector.state.borrow().connects);
    assert!(store.stats().unwrap().is_none());
    assert!(store.logs().unwrap().is_empty());
}

#[test]
fn test_check_reports_first_missing_config_field() {
    let mut config = config();
    config.email = String::new();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![1]);
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(!outcome.success);
    assert_eq!("missing config: email", outcome.message);
    assert_eq!(0, connector.state.borrow().connects);

    // checking that the missing field was logged but no stats recorded
    let logs = store.logs().unwrap();
    assert_eq!(1, logs.len());
    assert_eq!(LogLevel::Error, logs[0].level);
    assert_eq!("missing config: email", logs[0].message);
    assert!(store.stats().unwrap().is_none());
}

#[test]
fn test_check_throttles_recent_successful_check() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![1]);
    let mut sender = FakeSender::default();

    let now = Local::now().timestamp();
    store.set_last_successful_check(now - 30, now + 270).unwrap();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(outcome.success);
    assert_eq!("Throttled - recent check detected", outcome.message);

    // checking that the mailbox was left alone and nothing recorded
    assert_eq!(0, connector.state.borrow().connects);
    assert!(store.stats().unwrap().is_none());
    assert!(store.logs().unwrap().is_empty());

    // checking that the bookkeeping timestamp was still written
    assert!(store.last_check().unwrap().is_some());
}

#[test]
fn test_check_reports_connection_failure() {
    let config = config();
    let mut store = MemoryStore::default();
    let mut connector = FakeConnector::new(vec![1]);
    connector.fail = true;
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Connection failed: "));

    // checking that the failure was counted and logged
    let stats = store.stats().unwrap().unwrap();
    assert_eq!(1, stats.total_connections);
    assert_eq!(0, stats.successful_connections);
    assert_eq!(1, stats.failed_connections);
    let logs = store.logs().unwrap();
    assert_eq!(1, logs.len());
    assert_eq!(LogLevel::Error, logs[0].level);

    // checking that no throttle marker was written
    let now = Local::now().timestamp();
    assert!(store.last_successful_check(now).unwrap().is_none());
}

#[test]
fn test_check_finds_no_unread_emails() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![]);
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(outcome.success);
    assert_eq!("No unread emails found.", outcome.message);

    // checking that the session was closed exactly once
    assert_eq!(1, connector.state.borrow().closes);

    // checking that the run still counts as a success
    let stats = store.stats().unwrap().unwrap();
    assert_eq!(1, stats.total_connections);
    assert_eq!(1, stats.successful_connections);
    let now = Local::now().timestamp();
    assert!(store.last_successful_check(now).unwrap().is_some());
}

#[test]
fn test_check_processes_unseen_emails_and_marks_them_seen() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![4, 9, 17]);
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(outcome.success);
    assert_eq!("Processed 3 emails", outcome.message);

    // checking that every message became a ticket payload
    assert_eq!(3, sender.sent.len());
    assert_eq!("Help request 4", sender.sent[0].title);
    assert_eq!("I cannot log in. (message 4)", sender.sent[0].content);
    assert_eq!("Normal", sender.sent[0].priority);
    assert_eq!("Jane", sender.sent[0].sender.first_name);
    assert_eq!("Q Public", sender.sent[0].sender.last_name);
    assert_eq!("user4@example.com", sender.sent[0].sender.email);

    // checking that processed messages were marked seen, in order
    assert_eq!(vec![4, 9, 17], connector.state.borrow().seen);
    assert_eq!(1, connector.state.borrow().closes);

    // checking the activity log trail
    let logs = store.logs().unwrap();
    assert_eq!(4, logs.len());
    assert_eq!("Created ticket: Help request 4 from user4@example.com", logs[0].message);
    assert_eq!(LogLevel::Success, logs[0].level);
    assert_eq!("Processed 3 emails", logs[3].message);
}

#[test]
fn test_check_counts_webhook_failures_without_marking_seen() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![1, 2, 3]);
    let mut sender = FakeSender {
        fail_on_call: Some(2),
        ..FakeSender::default()
    };

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(outcome.success);
    assert_eq!("Processed 2 emails, 1 errors", outcome.message);

    // checking that the failed message kept its unseen flag
    assert_eq!(vec![1, 3], connector.state.borrow().seen);

    // checking that the failure was logged with its dispatch message
    let logs = store.logs().unwrap();
    let failed: Vec<_> = logs
        .iter()
        .filter(|entry| entry.level == LogLevel::Error)
        .collect();
    assert_eq!(1, failed.len());
    assert_eq!("Failed email ID 2: Webhook status 500: boom", failed[0].message);
}

#[test]
fn test_check_isolates_per_message_fetch_errors() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![7, 8]);
    connector.state.borrow_mut().fail_envelope_of = Some(7);
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(outcome.success);
    assert_eq!("Processed 1 emails, 1 errors", outcome.message);
    assert_eq!(vec![8], connector.state.borrow().seen);

    let logs = store.logs().unwrap();
    assert!(logs[0].message.starts_with("Error email ID 7: "));
    assert_eq!(LogLevel::Error, logs[0].level);
}

#[test]
fn test_check_caps_batch_and_reports_remaining() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new((1..=12).collect());
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(outcome.success);
    assert_eq!("Processed 10 emails, 2 remaining", outcome.message);
    assert_eq!(10, sender.sent.len());
    assert_eq!(10, connector.state.borrow().seen.len());
}

#[test]
fn test_check_reports_run_level_errors() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![1]);
    connector.state.borrow_mut().fail_search = true;
    let mut sender = FakeSender::default();

    let outcome = check(&config, &mut store, &connector, &mut sender);

    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Check error: "));

    // checking that the session was still closed exactly once
    assert_eq!(1, connector.state.borrow().closes);

    // checking that the run was counted as a failure
    let stats = store.stats().unwrap().unwrap();
    assert_eq!(1, stats.failed_connections);
    assert_eq!(0, stats.successful_connections);
    let now = Local::now().timestamp();
    assert!(store.last_successful_check(now).unwrap().is_none());
}

#[test]
fn test_test_connection_reports_mailbox_counters() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![1, 2]);
    let mut sender = FakeSender::default();

    let outcome = Checker::new(&config, &mut store, &connector, &mut sender)
        .test_connection()
        .unwrap();

    assert!(outcome.success);
    assert_eq!(
        "Email connection successful! Found 5 total messages, 2 unread.",
        outcome.message
    );
    assert_eq!(1, connector.state.borrow().closes);

    let stats = store.stats().unwrap().unwrap();
    assert_eq!(1, stats.total_connections);
    assert_eq!(1, stats.successful_connections);
}

#[test]
fn test_test_connection_reports_failure() {
    let config = config();
    let mut store = MemoryStore::default();
    let mut connector = FakeConnector::new(vec![]);
    connector.fail = true;
    let mut sender = FakeSender::default();

    let outcome = Checker::new(&config, &mut store, &connector, &mut sender)
        .test_connection()
        .unwrap();

    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Failed to connect: "));

    let stats = store.stats().unwrap().unwrap();
    assert_eq!(1, stats.failed_connections);
}

#[test]
fn test_test_connection_closes_session_after_status_failure() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![1]);
    connector.state.borrow_mut().fail_status = true;
    let mut sender = FakeSender::default();

    let outcome = Checker::new(&config, &mut store, &connector, &mut sender)
        .test_connection()
        .unwrap();

    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Failed to connect: "));

    // checking that the session was still closed exactly once
    assert_eq!(1, connector.state.borrow().closes);

    // checking that the self-test was counted as a failure
    let stats = store.stats().unwrap().unwrap();
    assert_eq!(1, stats.failed_connections);
    assert_eq!(0, stats.successful_connections);
}

#[test]
fn test_test_webhook_logs_probe_outcome() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![]);
    let mut sender = FakeSender::default();

    let outcome = Checker::new(&config, &mut store, &connector, &mut sender)
        .test_webhook()
        .unwrap();

    assert!(outcome.success);
    assert_eq!("Webhook test successful! Response: ok", outcome.message);

    let logs = store.logs().unwrap();
    assert_eq!(1, logs.len());
    assert_eq!(LogLevel::Success, logs[0].level);
    assert_eq!("Webhook test successful! Response: ok", logs[0].message);
}

#[test]
fn test_clear_logs_truncates_persisted_entries() {
    let config = config();
    let mut store = MemoryStore::default();
    let connector = FakeConnector::new(vec![]);
    let mut sender = FakeSender::default();

    let mut checker = Checker::new(&config, &mut store, &connector, &mut sender);
    checker.test_webhook().unwrap();
    checker.clear_logs().unwrap();

    assert!(store.logs().unwrap().is_empty());
}
