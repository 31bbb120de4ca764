//! # Key Store
//!
//! Signing keys and trusted verification keys, owned by the process entry
//! point and handed to whoever signs or verifies. Built once at startup;
//! lookups take `&self` and need no locking.
//!
//! Trusted keys are kept sorted by fingerprint so an issuer prefix resolves
//! with a binary search.

use serde::de::DeserializeOwned;
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use shared_types::Payload;
use tracing::{debug, info};

use super::codec::{decode_verified, peek_issuer};
use super::errors::TicketError;
use super::extract::{fingerprint, issuer_for, normalize_issuer};

#[derive(Debug, Clone)]
struct SigningEntry {
    fingerprint: String,
    keypair: Ed25519KeyPair,
}

/// Keys available to this process.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    /// Registration order; the first entry signs when no issuer is named.
    signing: Vec<SigningEntry>,
    /// Sorted by fingerprint.
    trusted: Vec<(String, Ed25519PublicKey)>,
}

impl KeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signing key and trust its public half. Returns its issuer name.
    pub fn add_signing_key(&mut self, keypair: Ed25519KeyPair) -> String {
        let public_key = keypair.public_key();
        let key_fingerprint = fingerprint(&public_key);
        if !self.signing.iter().any(|e| e.fingerprint == key_fingerprint) {
            self.signing.push(SigningEntry {
                fingerprint: key_fingerprint,
                keypair,
            });
        }
        self.trust(public_key);
        let issuer = issuer_for(&public_key);
        info!(issuer = %issuer, "Signing key registered");
        issuer
    }

    /// Trust a verification key. Returns `false` if it was already trusted.
    pub fn trust(&mut self, public_key: Ed25519PublicKey) -> bool {
        let key_fingerprint = fingerprint(&public_key);
        match self
            .trusted
            .binary_search_by(|(fp, _)| fp.as_str().cmp(key_fingerprint.as_str()))
        {
            Ok(_) => false,
            Err(at) => {
                debug!(issuer = %issuer_for(&public_key), "Public key trusted");
                self.trusted.insert(at, (key_fingerprint, public_key));
                true
            }
        }
    }

    /// The trusted key whose fingerprint starts with `issuer`.
    ///
    /// When several keys share the prefix the lowest fingerprint wins.
    pub fn find_public_key(&self, issuer: &str) -> Option<&Ed25519PublicKey> {
        let prefix = normalize_issuer(issuer);
        if prefix.is_empty() {
            return None;
        }
        let at = self
            .trusted
            .partition_point(|(fp, _)| fp.as_str() < prefix.as_str());
        self.trusted
            .get(at)
            .filter(|(fp, _)| fp.starts_with(&prefix))
            .map(|(_, key)| key)
    }

    /// The signing key whose fingerprint starts with `issuer`.
    pub fn find_signing_key(&self, issuer: &str) -> Option<&Ed25519KeyPair> {
        let prefix = normalize_issuer(issuer);
        if prefix.is_empty() {
            return None;
        }
        self.signing
            .iter()
            .find(|e| e.fingerprint.starts_with(&prefix))
            .map(|e| &e.keypair)
    }

    /// The first registered signing key.
    pub fn default_signing_key(&self) -> Option<&Ed25519KeyPair> {
        self.signing.first().map(|e| &e.keypair)
    }

    /// Number of signing keys.
    pub fn signing_count(&self) -> usize {
        self.signing.len()
    }

    /// Number of trusted verification keys.
    pub fn trusted_count(&self) -> usize {
        self.trusted.len()
    }

    /// Verify a grant with the key named by its own issuer claim.
    pub fn verify(&self, token: &str) -> Result<Payload, TicketError> {
        self.verify_claims(token)
    }

    /// Verify any claims with the key named by the token's issuer claim.
    ///
    /// The issuer is read unverified only to pick the key; the claims are
    /// returned only after the signature checks.
    pub fn verify_claims<T: DeserializeOwned>(&self, token: &str) -> Result<T, TicketError> {
        let issuer = peek_issuer(token)?;
        let public_key = self
            .find_public_key(&issuer)
            .ok_or(TicketError::UnknownIssuer(issuer))?;
        decode_verified(token, public_key)
    }
}

/// Verify against a store, returning the default payload and `false` on any failure.
pub fn verify_with_store(token: &str, store: &KeyStore) -> (Payload, bool) {
    match store.verify(token) {
        Ok(payload) => (payload, true),
        Err(e) => {
            debug!(reason = %e, "Ticket rejected");
            (Payload::default(), false)
        }
    }
}
