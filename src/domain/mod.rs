pub mod config;
pub use config::Config;

pub mod envelope;
pub use envelope::{Envelope, Mailbox};

pub mod email;
pub use email::{BodyStructure, Encoding, Part};

pub mod ticket;
pub use ticket::{Requester, TicketPayload};

pub mod stats;
pub use stats::{ConnectionEvent, ConnectionStats};

pub mod logs;
pub use logs::{LogEntry, LogLevel, Logs};

pub mod throttle;
