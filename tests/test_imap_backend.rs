use env_logger;
use log::LevelFilter;
use std::env;

use mail2ticket::{email, ImapBackend, ImapConfig, MailboxBackend};

// Runs against a live TLS mailbox, skipped unless the env vars below
// point to one.
#[test_with::env(
    MAIL2TICKET_TEST_IMAP_HOST,
    MAIL2TICKET_TEST_IMAP_LOGIN,
    MAIL2TICKET_TEST_IMAP_PASSWD
)]
#[test]
fn test_imap_backend() {
    env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .init();

    let config = ImapConfig {
        host: env::var("MAIL2TICKET_TEST_IMAP_HOST").unwrap(),
        port: env::var("MAIL2TICKET_TEST_IMAP_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(993),
        login: env::var("MAIL2TICKET_TEST_IMAP_LOGIN").unwrap(),
        passwd: env::var("MAIL2TICKET_TEST_IMAP_PASSWD").unwrap(),
        ..ImapConfig::default()
    };

    // checking that a session can be opened on the inbox
    let mut imap = ImapBackend::connect(&config).unwrap();

    // checking that the mailbox counters can be read
    let status = imap.status().unwrap();
    assert!(status.unseen <= status.messages as usize);

    // checking that unseen messages come back in ascending order
    let seqs = imap.search_unseen().unwrap();
    let mut sorted = seqs.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, seqs);

    // checking that unseen messages yield an envelope and a body
    // without losing their unseen flag
    for seq in seqs.clone().into_iter().take(2) {
        let envelope = imap.fetch_envelope(seq).unwrap();
        assert!(!envelope.from.addr.is_empty());

        let structure = imap.fetch_structure(seq).unwrap();
        let body = email::extract_body(&structure, |part| imap.fetch_part(seq, part)).unwrap();
        assert!(!body.contains('\r'));
    }

    let still_unseen = imap.search_unseen().unwrap();
    assert_eq!(seqs, still_unseen);

    imap.close().unwrap();
}
