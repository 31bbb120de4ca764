//! # Domain Layer
//!
//! Pure functions over `Payload` values.

pub mod errors;
pub mod price;
pub mod scale;
pub mod tiers;
