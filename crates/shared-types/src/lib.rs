//! # Shared Types Crate
//!
//! This crate contains the ticket claims exchanged between the issuer, the
//! codec and the pricing model.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the claim structs and their wire names are
//!   defined once, here.
//! - **Plain values**: claims are owned data with no behaviour beyond
//!   validation; signing lives in `tg-02-ticket-codec`.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
