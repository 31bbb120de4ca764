//! # Core Domain Entities
//!
//! Defines the ticket claims shared by the codec, the pricing model and the
//! broker collaborators that admit connections.
//!
//! ## Clusters
//!
//! - **Capability grant**: `Payload`, `ResourceLimits`
//! - **Name reservation**: `NameReservation`

use serde::{Deserialize, Serialize};

use crate::errors::PayloadError;

/// Seconds since the Unix epoch, in the unsigned 32-bit range used on the wire.
pub type UnixSeconds = u32;

/// Longest validity an issuer may grant, measured from issuance (366 days).
pub const MAX_VALIDITY_SECS: u32 = 60 * 60 * 24 * 366;

/// Seconds in the 30-day month used by the price schedule.
pub const SECS_PER_MONTH: u32 = 60 * 60 * 24 * 30;

// =============================================================================
// CLUSTER A: CAPABILITY GRANT
// =============================================================================

/// The capability grant carried inside a signed ticket.
///
/// Field order is the wire order of the encoded claims:
/// `exp, iss, jti, in, out, su, co, url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Payload {
    /// Absolute time after which the ticket is invalid.
    #[serde(rename = "exp")]
    pub expiration_time: UnixSeconds,
    /// Fingerprint prefix of the public key that verifies this ticket.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Opaque nonce for this ticket instance.
    #[serde(rename = "jti")]
    pub id: String,
    /// Permitted inbound bytes per hour.
    #[serde(rename = "in", with = "compact_float")]
    pub input_rate: f64,
    /// Permitted outbound bytes per hour.
    #[serde(rename = "out", with = "compact_float")]
    pub output_rate: f64,
    /// Permitted subscription operations per hour.
    #[serde(rename = "su", with = "compact_float")]
    pub subscriptions: f64,
    /// Permitted connection operations per hour.
    #[serde(rename = "co", with = "compact_float")]
    pub connections: f64,
    /// Address of the service this ticket authorizes access to.
    #[serde(rename = "url", skip_serializing_if = "String::is_empty")]
    pub target_url: String,
}

impl Payload {
    /// The four metered resource fields.
    pub fn limits(&self) -> ResourceLimits {
        ResourceLimits {
            input_rate: self.input_rate,
            output_rate: self.output_rate,
            subscriptions: self.subscriptions,
            connections: self.connections,
        }
    }

    /// Replace the metered resource fields, keeping identity and expiry.
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.input_rate = limits.input_rate;
        self.output_rate = limits.output_rate;
        self.subscriptions = limits.subscriptions;
        self.connections = limits.connections;
        self
    }

    /// Seconds of validity left at `now`, zero once expired.
    pub fn remaining_secs(&self, now: UnixSeconds) -> u32 {
        self.expiration_time.saturating_sub(now)
    }

    /// Whether the ticket has expired at `now`.
    pub fn is_expired(&self, now: UnixSeconds) -> bool {
        self.expiration_time <= now
    }

    /// Check that every rate field is finite and non-negative.
    pub fn validate_rates(&self) -> Result<(), PayloadError> {
        self.limits().validate()
    }
}

/// The metered part of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ResourceLimits {
    /// Inbound bytes per hour.
    #[serde(rename = "in")]
    pub input_rate: f64,
    /// Outbound bytes per hour.
    #[serde(rename = "out")]
    pub output_rate: f64,
    /// Subscription operations per hour.
    #[serde(rename = "su")]
    pub subscriptions: f64,
    /// Connection operations per hour.
    #[serde(rename = "co")]
    pub connections: f64,
}

impl ResourceLimits {
    /// Check that every field is finite and non-negative.
    pub fn validate(&self) -> Result<(), PayloadError> {
        for (field, value) in [
            ("in", self.input_rate),
            ("out", self.output_rate),
            ("su", self.subscriptions),
            ("co", self.connections),
        ] {
            if !value.is_finite() {
                return Err(PayloadError::NonFiniteRate { field });
            }
            if value < 0.0 {
                return Err(PayloadError::NegativeRate { field, value });
            }
        }
        Ok(())
    }
}

// =============================================================================
// CLUSTER B: NAME RESERVATION
// =============================================================================

/// Claims reserving a subscription name for the holder of `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NameReservation {
    /// Absolute time after which the reservation lapses.
    #[serde(rename = "exp", skip_serializing_if = "is_zero")]
    pub expiration_time: UnixSeconds,
    /// Fingerprint prefix of the verifying public key.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Public key of the reserving user.
    #[serde(rename = "jti", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// The reserved subscription name.
    pub name: String,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Rate fields are `f64` in memory but integral values go on the wire without a
/// fractional part (`70000`, not `70000.0`); issued tickets are signed over
/// those exact bytes.
pub mod compact_float {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Largest magnitude written as an integer literal.
    const INTEGRAL_LIMIT: f64 = 9.0e18;

    pub fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_LIMIT {
            s.serialize_i64(*value as i64)
        } else {
            s.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        f64::deserialize(d)
    }
}
