//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use shared_types::{NameReservation, Payload, UnixSeconds};

use crate::domain::errors::TicketError;

/// Primary ticket API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait TicketApi: Send + Sync {
    // =========================================================================
    // Issuance
    // =========================================================================

    /// Check a grant against issuance policy and sign it.
    ///
    /// An empty issuer is filled from the default signing key and an empty id
    /// gets a random one.
    fn issue(&self, payload: Payload, now: UnixSeconds) -> Result<String, TicketError>;

    /// Sign a subscription name reservation.
    fn reserve_name(
        &self,
        reservation: NameReservation,
        now: UnixSeconds,
    ) -> Result<String, TicketError>;

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verify a grant with the key its issuer names.
    ///
    /// Expiry is not checked; that is the caller's policy.
    fn verify(&self, token: &str) -> Result<Payload, TicketError>;

    /// Verify a name reservation with the key its issuer names.
    fn verify_reservation(&self, token: &str) -> Result<NameReservation, TicketError>;
}
