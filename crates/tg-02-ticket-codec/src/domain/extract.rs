//! # Issuer Identity and Token Extraction
//!
//! An issuer is named by the leading characters of its public key in
//! base64url. Tickets copied out of mail, URLs or logs often carry junk
//! around them; `extract_token` finds the token by its known header.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use shared_crypto::Ed25519PublicKey;

use super::codec::{decode_issuer_segment, ED25519_HEADER_SEGMENT, EDDSA_HEADER_SEGMENT};
use super::errors::TicketError;

/// Characters of the fingerprint used as the issuer name.
pub const ISSUER_LEN: usize = 4;

/// Length of generated ticket ids.
pub const TICKET_ID_LEN: usize = 24;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Full base64url fingerprint of a public key.
pub fn fingerprint(public_key: &Ed25519PublicKey) -> String {
    URL_SAFE_NO_PAD.encode(public_key.as_bytes())
}

/// Issuer name for tickets signed by the matching private key.
pub fn issuer_for(public_key: &Ed25519PublicKey) -> String {
    let mut issuer = fingerprint(public_key);
    issuer.truncate(ISSUER_LEN);
    issuer
}

/// Map a standard-alphabet issuer onto the url alphabet.
pub fn normalize_issuer(issuer: &str) -> String {
    issuer
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// A fresh ticket id: 24 characters of `[0-9a-z]`.
pub fn random_ticket_id() -> String {
    let mut rng = rand::thread_rng();
    (0..TICKET_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Find a token inside `text` and return it with its unverified issuer.
///
/// The token starts at a known header segment and ends after the run of
/// base64url characters that follows the second `.`.
pub fn extract_token(text: &str) -> Result<(&str, String), TicketError> {
    let (start, header) = [EDDSA_HEADER_SEGMENT, ED25519_HEADER_SEGMENT]
        .into_iter()
        .filter_map(|header| text.find(&format!("{}.", header)).map(|at| (at, header)))
        .min_by_key(|(at, _)| *at)
        .ok_or_else(|| TicketError::MalformedToken("no known token header".into()))?;

    let payload_start = start + header.len() + 1;
    let payload_len = text[payload_start..]
        .find('.')
        .ok_or_else(|| TicketError::MalformedToken("missing signature segment".into()))?;
    let issuer = decode_issuer_segment(&text[payload_start..payload_start + payload_len])?;

    let signature_start = payload_start + payload_len + 1;
    let signature_len = text[signature_start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        .count();
    if signature_len == 0 {
        return Err(TicketError::MalformedToken("empty signature segment".into()));
    }

    Ok((&text[start..signature_start + signature_len], issuer))
}
