//! # Ticket Errors
//!
//! Error types for encoding, verifying and issuing tickets.

use thiserror::Error;

/// Errors that can occur while handling a ticket.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketError {
    /// Wrong segment count, bad base64url, or an unknown header.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// The signed claims could not be decoded.
    #[error("Cannot parse claims: {0}")]
    Parse(String),

    /// The signature does not verify under the selected key.
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// No trusted key matches the issuer prefix.
    #[error("Unknown issuer: {0:?}")]
    UnknownIssuer(String),

    /// No usable signing key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The claims break issuance policy.
    #[error("Issuance rejected: {0}")]
    IssuanceRejected(String),

    /// The claims could not be serialized.
    #[error("Cannot encode claims: {0}")]
    Encoding(String),
}

impl TicketError {
    /// Short label for the `result` metric dimension.
    pub fn label(&self) -> &'static str {
        match self {
            TicketError::MalformedToken(_) => "malformed",
            TicketError::Parse(_) => "bad_claims",
            TicketError::SignatureInvalid => "bad_signature",
            TicketError::UnknownIssuer(_) => "unknown_issuer",
            TicketError::InvalidKey(_) => "invalid_key",
            TicketError::IssuanceRejected(_) => "rejected",
            TicketError::Encoding(_) => "encoding",
        }
    }
}
