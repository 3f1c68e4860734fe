pub mod envelope;
pub use envelope::*;

pub mod imap;
