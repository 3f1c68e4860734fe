pub mod store;
pub use store::*;

pub mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "sqlite-store")]
pub mod sqlite;
#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;

pub mod recorder;
pub use recorder::Recorder;
