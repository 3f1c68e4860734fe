pub mod check;
pub use check::{CheckOutcome, Checker, Error, Result};
