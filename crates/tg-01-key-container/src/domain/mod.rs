//! # Domain Layer
//!
//! Pure parsing of the binary key layouts with no I/O dependencies.

pub mod container;
pub mod errors;
pub mod wire;
