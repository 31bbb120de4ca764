//! # Domain Layer
//!
//! Token encoding and key selection. No I/O.

pub mod codec;
pub mod errors;
pub mod extract;
pub mod key_store;
