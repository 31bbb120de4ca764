//! # Compact Token Codec
//!
//! `header.payload.signature`, each segment base64url without padding. The
//! signature is Ed25519 over the ASCII bytes of `header.payload`, so the same
//! claims and key always produce the same token.
//!
//! Verification decodes the claims only after the signature checks out; a
//! caller never sees fields from an unverified token except through the
//! explicit `peek_*` functions.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use shared_types::Payload;
use tracing::debug;

use super::errors::TicketError;

/// Header emitted on every signed token.
pub const ED25519_HEADER: &str = r#"{"alg":"Ed25519","typ":"JWT"}"#;

/// Header written by older issuers; accepted on verify.
pub const EDDSA_HEADER: &str = r#"{"alg":"EdDSA","typ":"JWT"}"#;

/// `ED25519_HEADER` as a token segment.
pub const ED25519_HEADER_SEGMENT: &str = "eyJhbGciOiJFZDI1NTE5IiwidHlwIjoiSldUIn0";

/// `EDDSA_HEADER` as a token segment.
pub const EDDSA_HEADER_SEGMENT: &str = "eyJhbGciOiJFZERTQSIsInR5cCI6IkpXVCJ9";

const ACCEPTED_ALGORITHMS: [&str; 2] = ["Ed25519", "EdDSA"];

#[derive(Deserialize)]
struct Header {
    alg: String,
}

#[derive(Deserialize, Default)]
struct IssuerClaim {
    #[serde(default)]
    iss: String,
}

// =============================================================================
// SIGNING
// =============================================================================

/// Sign a capability grant.
pub fn sign(payload: &Payload, keypair: &Ed25519KeyPair) -> Result<String, TicketError> {
    sign_claims(payload, keypair)
}

/// Sign any claims struct under the standard header.
pub fn sign_claims<T: Serialize>(claims: &T, keypair: &Ed25519KeyPair) -> Result<String, TicketError> {
    sign_with_header(ED25519_HEADER_SEGMENT, claims, keypair)
}

fn sign_with_header<T: Serialize>(
    header_segment: &str,
    claims: &T,
    keypair: &Ed25519KeyPair,
) -> Result<String, TicketError> {
    let json = serde_json::to_vec(claims).map_err(|e| TicketError::Encoding(e.to_string()))?;
    let signing_input = format!("{}.{}", header_segment, URL_SAFE_NO_PAD.encode(json));
    let signature = keypair.sign(signing_input.as_bytes());
    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature.as_bytes())
    ))
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Verify a grant, returning the default payload and `false` on any failure.
pub fn verify(token: &str, public_key: &Ed25519PublicKey) -> (Payload, bool) {
    verify_claims(token, public_key)
}

/// Verify a grant with the failure reason.
pub fn try_verify(token: &str, public_key: &Ed25519PublicKey) -> Result<Payload, TicketError> {
    decode_verified(token, public_key)
}

/// Verify any claims struct, returning the default and `false` on any failure.
pub fn verify_claims<T: DeserializeOwned + Default>(
    token: &str,
    public_key: &Ed25519PublicKey,
) -> (T, bool) {
    match decode_verified(token, public_key) {
        Ok(claims) => (claims, true),
        Err(e) => {
            debug!(reason = %e, "Ticket rejected");
            (T::default(), false)
        }
    }
}

/// Check the header and signature, then decode the claims.
pub fn decode_verified<T: DeserializeOwned>(
    token: &str,
    public_key: &Ed25519PublicKey,
) -> Result<T, TicketError> {
    let (header_segment, payload_segment, signature_segment) = split_token(token)?;

    let header_json = decode_segment(header_segment, "header")?;
    let header: Header = serde_json::from_slice(&header_json)
        .map_err(|e| TicketError::MalformedToken(format!("header: {}", e)))?;
    if !ACCEPTED_ALGORITHMS.contains(&header.alg.as_str()) {
        return Err(TicketError::MalformedToken(format!(
            "unsupported algorithm {}",
            header.alg
        )));
    }

    let claims_json = decode_segment(payload_segment, "payload")?;
    let signature_bytes = decode_segment(signature_segment, "signature")?;
    let signature = Ed25519Signature::from_slice(&signature_bytes)
        .map_err(|e| TicketError::MalformedToken(e.to_string()))?;

    let signing_input = &token[..header_segment.len() + 1 + payload_segment.len()];
    public_key
        .verify(signing_input.as_bytes(), &signature)
        .map_err(|_| TicketError::SignatureInvalid)?;

    serde_json::from_slice(&claims_json).map_err(|e| TicketError::Parse(e.to_string()))
}

// =============================================================================
// UNVERIFIED ACCESS
// =============================================================================

/// Decode the claims without checking the signature.
///
/// For choosing a verification key only; the result must not be trusted.
pub fn peek_claims<T: DeserializeOwned>(token: &str) -> Result<T, TicketError> {
    let (_, payload_segment, _) = split_token(token)?;
    let claims_json = decode_segment(payload_segment, "payload")?;
    serde_json::from_slice(&claims_json).map_err(|e| TicketError::Parse(e.to_string()))
}

/// The unverified grant.
pub fn peek_payload(token: &str) -> Result<Payload, TicketError> {
    peek_claims(token)
}

/// The unverified `iss` claim of any ticket kind.
pub fn peek_issuer(token: &str) -> Result<String, TicketError> {
    peek_claims::<IssuerClaim>(token).map(|claim| claim.iss)
}

pub(crate) fn decode_issuer_segment(payload_segment: &str) -> Result<String, TicketError> {
    let claims_json = decode_segment(payload_segment, "payload")?;
    serde_json::from_slice::<IssuerClaim>(&claims_json)
        .map(|claim| claim.iss)
        .map_err(|e| TicketError::Parse(e.to_string()))
}

fn split_token(token: &str) -> Result<(&str, &str, &str), TicketError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok((header, payload, signature)),
        _ => Err(TicketError::MalformedToken(format!(
            "expected 3 segments, found {}",
            token.split('.').count()
        ))),
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, TicketError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TicketError::MalformedToken(format!("{}: {}", name, e)))
}
