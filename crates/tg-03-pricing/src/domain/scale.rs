//! # Payload Scaling
//!
//! Multiplies the metered rates of a grant; identity, expiry and target
//! are carried over untouched.

use shared_types::{Payload, ResourceLimits};

use super::errors::PricingError;

/// A copy of `payload` with every rate multiplied by `factor`.
pub fn scale(payload: &Payload, factor: f64) -> Result<Payload, PricingError> {
    let limits = scale_limits(&payload.limits(), factor)?;
    Ok(payload.clone().with_limits(limits))
}

/// `limits` with every field multiplied by `factor`.
pub fn scale_limits(limits: &ResourceLimits, factor: f64) -> Result<ResourceLimits, PricingError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(PricingError::InvalidFactor(factor));
    }
    Ok(ResourceLimits {
        input_rate: limits.input_rate * factor,
        output_rate: limits.output_rate * factor,
        subscriptions: limits.subscriptions * factor,
        connections: limits.connections * factor,
    })
}
