//! # Key Container Subsystem
//!
//! Extracts raw Ed25519 key bytes from OpenSSH key files so the ticket codec
//! can sign and verify.
//!
//! ## Architecture
//!
//! - `domain/` - binary container parsing, no I/O
//! - `adapters/` - key files, armor, key lists
//!
//! ## Supported Inputs
//!
//! | Input | Result |
//! |-------|--------|
//! | public key blob | 32 raw bytes |
//! | unencrypted `openssh-key-v1` container | 64 raw bytes (seed \|\| public) |
//! | encrypted container | `EncryptedKeyUnsupported` |
//! | any other key type | `UnsupportedKeyFormat` |

pub mod adapters;
pub mod domain;

pub use adapters::files::{
    decode_private_key_armor, load_private_key_file, load_private_key_list, load_public_key_file,
    load_public_key_list, parse_private_key_list, parse_public_key_line, parse_public_key_list,
    KeyMaterial,
};
pub use domain::container::{
    parse_private_container, parse_private_key, parse_public_key, PrivateContainer,
    PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE,
};
pub use domain::errors::KeyContainerError;
