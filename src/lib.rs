pub mod backend;
pub use backend::*;

pub mod sender;
pub use sender::*;

pub mod domain;
pub use domain::*;

pub mod store;
pub use store::{MemoryStore, Recorder, Store};
#[cfg(feature = "sqlite-store")]
pub use store::SqliteStore;

pub mod check;
pub use check::{CheckOutcome, Checker};
