mod backend;

pub mod imap;

pub use self::backend::{Error, MailboxBackend, MailboxConnector, MailboxStatus, Result};
pub use self::imap::{ImapBackend, ImapConfig, ImapConnector};
