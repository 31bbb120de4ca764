//! # Key Container Errors
//!
//! Error types for key container and key file parsing.

use thiserror::Error;

/// Errors that can occur while extracting raw key bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyContainerError {
    /// A length-prefixed field or fixed-size field runs past the buffer.
    #[error("Truncated {field}: need {needed} bytes, {available} available")]
    Parse {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    /// Not an `openssh-key-v1` container, not Ed25519, or more than one key.
    #[error("Unsupported key format: {0}")]
    UnsupportedKeyFormat(String),

    /// The container is passphrase protected.
    #[error("Encrypted key containers are not supported (cipher={cipher}, kdf={kdf})")]
    EncryptedKeyUnsupported { cipher: String, kdf: String },

    /// A decoded key has the wrong length.
    #[error("Unexpected key size: expected {expected}, got {actual}")]
    UnexpectedKeySize { expected: usize, actual: usize },

    /// The repeated public key copies inside a container disagree.
    #[error("Public key mismatch between container sections")]
    PublicKeyMismatch,

    /// Base64 or armor decoding failed.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The key bytes are not a usable Ed25519 key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The key file could not be read.
    #[error("Cannot read {path}: {reason}")]
    Io { path: String, reason: String },
}
