//! # Error Types
//!
//! Defines error types for claims shared across subsystems.

use thiserror::Error;

/// A payload field violates the grant invariants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PayloadError {
    /// A rate field is below zero.
    #[error("Negative rate: {field}={value}")]
    NegativeRate { field: &'static str, value: f64 },

    /// A rate field is NaN or infinite.
    #[error("Non-finite rate: {field}")]
    NonFiniteRate { field: &'static str },
}
