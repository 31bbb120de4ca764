//! # Pricing Subsystem
//!
//! Prices capability grants and scales them between sizes.
//!
//! ## Properties
//!
//! - `price` never decreases when a rate or the remaining validity grows
//! - expired grants price at zero
//! - `scale(p, k)` multiplies the four rates by `k` and nothing else

pub mod domain;

pub use domain::errors::PricingError;
pub use domain::price::{price, price_with, PriceSchedule};
pub use domain::scale::{scale, scale_limits};
pub use domain::tiers::{TierQuote, TokenTier, BASELINE_LIMITS, BASELINE_MONTHLY_PRICE};
