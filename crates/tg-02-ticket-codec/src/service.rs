//! # Ticket Service
//!
//! Application service layer that implements the `TicketApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`TicketApi`)
//! - Applies issuance policy before anything is signed
//! - Delegates encoding and key selection to the domain layer
//! - Counts outcomes for metrics and the status reporter

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shared_crypto::Ed25519KeyPair;
use shared_types::{NameReservation, Payload, UnixSeconds, MAX_VALIDITY_SECS};
use tollgate_telemetry::{
    log_ticket_event, time_histogram, Reporter, TICKETS_ISSUED, TICKET_VERIFICATIONS,
    TICKET_VERIFICATION_DURATION,
};
use tracing::warn;

use crate::domain::codec::{sign, sign_claims};
use crate::domain::errors::TicketError;
use crate::domain::extract::{issuer_for, random_ticket_id};
use crate::domain::key_store::KeyStore;
use crate::ports::inbound::TicketApi;

/// Ticket issuance and verification over a shared `KeyStore`.
pub struct TicketService {
    store: Arc<KeyStore>,
    stats: Arc<TicketStats>,
}

impl TicketService {
    /// Create a service over a store built at startup.
    pub fn new(store: Arc<KeyStore>) -> Self {
        Self {
            store,
            stats: Arc::new(TicketStats::default()),
        }
    }

    /// The underlying key store.
    pub fn store(&self) -> &KeyStore {
        &self.store
    }

    /// Outcome counters.
    pub fn stats(&self) -> TicketStatsSnapshot {
        self.stats.snapshot()
    }

    /// A reporter sharing this service's counters.
    pub fn reporter(&self) -> TicketStatsReporter {
        TicketStatsReporter {
            stats: Arc::clone(&self.stats),
        }
    }

    /// Resolve the signing key, filling an empty issuer from the default key.
    fn signing_key_for(&self, issuer: &mut String) -> Result<&Ed25519KeyPair, TicketError> {
        if issuer.is_empty() {
            let keypair = self
                .store
                .default_signing_key()
                .ok_or_else(|| TicketError::InvalidKey("no signing key loaded".into()))?;
            *issuer = issuer_for(&keypair.public_key());
            return Ok(keypair);
        }
        self.store.find_signing_key(issuer).ok_or_else(|| {
            TicketError::IssuanceRejected(format!(
                "issuer {} is not a prefix of any signing key",
                issuer
            ))
        })
    }

    fn rejected(&self, error: TicketError) -> TicketError {
        self.stats.issuance_rejected.fetch_add(1, Ordering::Relaxed);
        warn!(reason = %error, "Issuance rejected");
        error
    }

    fn record_verification<T>(&self, result: &Result<T, TicketError>) {
        match result {
            Ok(_) => {
                self.stats.verified.fetch_add(1, Ordering::Relaxed);
                TICKET_VERIFICATIONS.with_label_values(&["valid"]).inc();
            }
            Err(e) => {
                self.stats.verification_failed.fetch_add(1, Ordering::Relaxed);
                TICKET_VERIFICATIONS.with_label_values(&[e.label()]).inc();
                warn!(reason = %e, "Ticket verification failed");
            }
        }
    }
}

/// Reject expiry at or before `now`, or further out than the validity bound.
fn check_expiry(expiration_time: UnixSeconds, now: UnixSeconds) -> Result<(), TicketError> {
    if expiration_time <= now {
        return Err(TicketError::IssuanceRejected(format!(
            "expiration {} is not after {}",
            expiration_time, now
        )));
    }
    if u64::from(expiration_time) > u64::from(now) + u64::from(MAX_VALIDITY_SECS) {
        return Err(TicketError::IssuanceRejected(format!(
            "validity of {}s exceeds the {}s maximum",
            expiration_time - now,
            MAX_VALIDITY_SECS
        )));
    }
    Ok(())
}

impl TicketApi for TicketService {
    fn issue(&self, mut payload: Payload, now: UnixSeconds) -> Result<String, TicketError> {
        let keypair = self
            .signing_key_for(&mut payload.issuer)
            .map_err(|e| self.rejected(e))?;
        payload
            .validate_rates()
            .map_err(|e| self.rejected(TicketError::IssuanceRejected(e.to_string())))?;
        check_expiry(payload.expiration_time, now).map_err(|e| self.rejected(e))?;
        if payload.id.is_empty() {
            payload.id = random_ticket_id();
        }

        let token = sign(&payload, keypair)?;
        self.stats.issued.fetch_add(1, Ordering::Relaxed);
        TICKETS_ISSUED.inc();
        log_ticket_event!(
            info,
            "Ticket issued",
            payload.issuer,
            payload.id,
            expires = payload.expiration_time
        );
        Ok(token)
    }

    fn reserve_name(
        &self,
        mut reservation: NameReservation,
        now: UnixSeconds,
    ) -> Result<String, TicketError> {
        let keypair = self
            .signing_key_for(&mut reservation.issuer)
            .map_err(|e| self.rejected(e))?;
        if reservation.name.is_empty() {
            return Err(self.rejected(TicketError::IssuanceRejected(
                "empty subscription name".into(),
            )));
        }
        // Zero means the reservation does not lapse
        if reservation.expiration_time != 0 {
            check_expiry(reservation.expiration_time, now).map_err(|e| self.rejected(e))?;
        }

        let token = sign_claims(&reservation, keypair)?;
        self.stats.issued.fetch_add(1, Ordering::Relaxed);
        TICKETS_ISSUED.inc();
        log_ticket_event!(
            info,
            "Name reserved",
            reservation.issuer,
            reservation.id,
            subscription = %reservation.name
        );
        Ok(token)
    }

    fn verify(&self, token: &str) -> Result<Payload, TicketError> {
        let _timer = time_histogram!(TICKET_VERIFICATION_DURATION);
        let result = self.store.verify(token);
        self.record_verification(&result);
        result
    }

    fn verify_reservation(&self, token: &str) -> Result<NameReservation, TicketError> {
        let _timer = time_histogram!(TICKET_VERIFICATION_DURATION);
        let result = self.store.verify_claims(token);
        self.record_verification(&result);
        result
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Lock-free outcome counters.
#[derive(Debug, Default)]
pub struct TicketStats {
    issued: AtomicU64,
    issuance_rejected: AtomicU64,
    verified: AtomicU64,
    verification_failed: AtomicU64,
}

impl TicketStats {
    /// Current values.
    pub fn snapshot(&self) -> TicketStatsSnapshot {
        TicketStatsSnapshot {
            issued: self.issued.load(Ordering::Relaxed),
            issuance_rejected: self.issuance_rejected.load(Ordering::Relaxed),
            verified: self.verified.load(Ordering::Relaxed),
            verification_failed: self.verification_failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of `TicketStats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketStatsSnapshot {
    pub issued: u64,
    pub issuance_rejected: u64,
    pub verified: u64,
    pub verification_failed: u64,
}

/// Reports ticket counters and rates.
pub struct TicketStatsReporter {
    stats: Arc<TicketStats>,
}

impl Reporter for TicketStatsReporter {
    fn name(&self) -> &str {
        "tickets"
    }

    fn report(&self, elapsed: Duration) -> Vec<String> {
        let s = self.stats.snapshot();
        let secs = elapsed.as_secs_f64();
        let rate = |n: u64| if secs > 0.0 { n as f64 / secs } else { 0.0 };
        vec![
            format!(
                "issued {} ({:.2}/s), rejected {}",
                s.issued,
                rate(s.issued),
                s.issuance_rejected
            ),
            format!(
                "verified {} ({:.2}/s), failed {}",
                s.verified,
                rate(s.verified),
                s.verification_failed
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codec::tests::{golden_payload, sample_keypair, GOLDEN_TOKEN};
    use crate::domain::extract::TICKET_ID_LEN;

    const NOW: UnixSeconds = 1_609_462_800 - 3_600;

    fn service() -> TicketService {
        let mut store = KeyStore::new();
        store.add_signing_key(sample_keypair());
        TicketService::new(Arc::new(store))
    }

    #[test]
    fn test_issue_reproduces_golden_token() {
        let service = service();
        assert_eq!(service.issue(golden_payload(), NOW).unwrap(), GOLDEN_TOKEN);
        assert_eq!(service.stats().issued, 1);
    }

    #[test]
    fn test_issue_fills_issuer_and_id() {
        let service = service();
        let payload = Payload {
            issuer: String::new(),
            id: String::new(),
            ..golden_payload()
        };
        let token = service.issue(payload, NOW).unwrap();
        let verified = service.verify(&token).unwrap();

        assert_eq!(verified.issuer, "1iVt");
        assert_eq!(verified.id.len(), TICKET_ID_LEN);
    }

    #[test]
    fn test_issue_rejects_foreign_issuer() {
        let service = service();
        let payload = Payload {
            issuer: "zzzz".to_string(),
            ..golden_payload()
        };
        assert!(matches!(
            service.issue(payload, NOW),
            Err(TicketError::IssuanceRejected(_))
        ));
        assert_eq!(service.stats().issuance_rejected, 1);
    }

    #[test]
    fn test_issue_rejects_bad_rates() {
        let service = service();
        for payload in [
            Payload {
                input_rate: -1.0,
                ..golden_payload()
            },
            Payload {
                connections: f64::NAN,
                ..golden_payload()
            },
            Payload {
                output_rate: f64::INFINITY,
                ..golden_payload()
            },
        ] {
            assert!(matches!(
                service.issue(payload, NOW),
                Err(TicketError::IssuanceRejected(_))
            ));
        }
    }

    #[test]
    fn test_issue_expiry_bounds() {
        let service = service();
        let at = |exp| Payload {
            expiration_time: exp,
            ..golden_payload()
        };

        assert!(service.issue(at(NOW), NOW).is_err());
        assert!(service.issue(at(NOW - 1), NOW).is_err());
        assert!(service.issue(at(NOW + 1), NOW).is_ok());
        assert!(service.issue(at(NOW + MAX_VALIDITY_SECS), NOW).is_ok());
        assert!(service.issue(at(NOW + MAX_VALIDITY_SECS + 1), NOW).is_err());
    }

    #[test]
    fn test_expiry_near_u32_max() {
        assert!(check_expiry(u32::MAX, u32::MAX - 10).is_ok());
        assert!(check_expiry(u32::MAX, 0).is_err());
    }

    #[test]
    fn test_issue_without_signing_key() {
        let service = TicketService::new(Arc::new(KeyStore::new()));
        let payload = Payload {
            issuer: String::new(),
            ..golden_payload()
        };
        assert!(matches!(
            service.issue(payload, NOW),
            Err(TicketError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_verify_counts_outcomes() {
        let service = service();
        assert!(service.verify(GOLDEN_TOKEN).is_ok());
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("junk").is_err());

        let stats = service.stats();
        assert_eq!(stats.verified, 1);
        assert_eq!(stats.verification_failed, 2);
    }

    #[test]
    fn test_verify_ignores_expiry() {
        // Expired long ago, still a valid signature
        let service = service();
        let payload = service.verify(GOLDEN_TOKEN).unwrap();
        assert!(payload.is_expired(2_000_000_000));
    }

    #[test]
    fn test_name_reservation_flow() {
        let service = service();
        let reservation = NameReservation {
            expiration_time: 0,
            issuer: String::new(),
            id: "user-key".to_string(),
            name: "weather/paris".to_string(),
        };
        let token = service.reserve_name(reservation, NOW).unwrap();
        let verified = service.verify_reservation(&token).unwrap();

        assert_eq!(verified.issuer, "1iVt");
        assert_eq!(verified.name, "weather/paris");
    }

    #[test]
    fn test_name_reservation_needs_a_name() {
        let service = service();
        let reservation = NameReservation {
            issuer: "1iVt".to_string(),
            ..NameReservation::default()
        };
        assert!(service.reserve_name(reservation, NOW).is_err());
    }

    #[test]
    fn test_reporter_lines() {
        let service = service();
        service.issue(golden_payload(), NOW).unwrap();
        service.verify(GOLDEN_TOKEN).unwrap();
        let _ = service.verify("bad");

        let reporter = service.reporter();
        let lines = reporter.report(Duration::from_secs(2));
        assert_eq!(reporter.name(), "tickets");
        assert_eq!(lines[0], "issued 1 (0.50/s), rejected 0");
        assert_eq!(lines[1], "verified 1 (0.50/s), failed 1");
        assert!(reporter.report(Duration::ZERO)[0].contains("(0.00/s)"));
    }
}
