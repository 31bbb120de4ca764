//! # Pricing Errors

use thiserror::Error;

/// Errors from pricing and scaling.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Scale factors must be finite and strictly positive.
    #[error("Invalid scale factor: {0}")]
    InvalidFactor(f64),

    /// A schedule weight is negative or not finite.
    #[error("Invalid price schedule: {field}={value}")]
    InvalidSchedule { field: &'static str, value: f64 },

    /// No tier has this name.
    #[error("Unknown token tier: {0}")]
    UnknownTier(String),
}
