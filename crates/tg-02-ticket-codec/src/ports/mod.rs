//! # Ports Layer
//!
//! Trait definitions for the ticket API.

pub mod inbound;
