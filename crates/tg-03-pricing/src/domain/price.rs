//! # Ticket Price
//!
//! `price = months_left * (co * w_co + su * w_su + in * w_in + out * w_out)`
//!
//! Every weight is non-negative, so the price never decreases when a rate or
//! the remaining validity grows. Expired grants price at zero.

use serde::{Deserialize, Serialize};
use shared_types::{Payload, UnixSeconds, SECS_PER_MONTH};

use super::errors::PricingError;

/// Seconds in a month, as a float.
const MONTH: f64 = SECS_PER_MONTH as f64;

/// Per-unit monthly cost of each metered resource.
///
/// Defaults come from a $5/month instance shared by 10,000 connections,
/// 500,000 subscriptions (stored on two layers) and 1 TB of traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSchedule {
    /// Per connection operation/hour, per month.
    pub connection: f64,
    /// Per subscription operation/hour, per month.
    pub subscription: f64,
    /// Per inbound unit rate, per month.
    pub input: f64,
    /// Per outbound unit rate, per month.
    pub output: f64,
}

impl Default for PriceSchedule {
    fn default() -> Self {
        let io = 5.0 * MONTH / 1e12;
        Self {
            connection: 5.0 / 10_000.0,
            subscription: 2.0 * 5.0 / 500_000.0,
            input: io,
            output: io,
        }
    }
}

impl PriceSchedule {
    /// Check that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), PricingError> {
        for (field, value) in [
            ("connection", self.connection),
            ("subscription", self.subscription),
            ("input", self.input),
            ("output", self.output),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::InvalidSchedule { field, value });
            }
        }
        Ok(())
    }

    /// Cost of the payload's rates for one month.
    pub fn monthly(&self, payload: &Payload) -> f64 {
        // NaN and negative rates contribute nothing
        let rate = |v: f64| v.max(0.0);
        rate(payload.connections) * self.connection
            + rate(payload.subscriptions) * self.subscription
            + rate(payload.input_rate) * self.input
            + rate(payload.output_rate) * self.output
    }
}

/// Price of a grant at `now` under the default schedule.
pub fn price(payload: &Payload, now: UnixSeconds) -> f64 {
    price_with(payload, now, &PriceSchedule::default())
}

/// Price of a grant at `now` under `schedule`.
pub fn price_with(payload: &Payload, now: UnixSeconds, schedule: &PriceSchedule) -> f64 {
    let remaining = payload.remaining_secs(now);
    if remaining == 0 {
        return 0.0;
    }
    let months = f64::from(remaining) / MONTH;
    // Overflowing rates saturate instead of reaching inf
    (schedule.monthly(payload).min(f64::MAX) * months).min(f64::MAX)
}
