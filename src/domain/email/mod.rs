//! Message module.
//!
//! This module contains everything related to decoding messages into
//! ticket bodies.

pub mod structure;
pub use structure::*;

pub mod html;
pub use html::*;

pub mod body;
pub use body::*;

pub mod imap;
