//! # Ticket Codec Subsystem
//!
//! Signs and verifies the compact capability tickets that admit a bearer to
//! the messaging network.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): token encoding, issuer names, key store
//! - **Ports Layer** (`ports/`): the `TicketApi` trait
//! - **Service Layer** (`service.rs`): issuance policy and outcome counting
//!
//! ## Token Format
//!
//! ```text
//! base64url(header) . base64url(claims JSON) . base64url(ed25519 signature)
//! ```
//!
//! ## Security Notes
//!
//! - **Verify before decode**: claims are parsed only after the signature checks
//! - **Key selection**: the unverified `iss` claim only picks which trusted key
//!   to try; it never skips verification
//! - **Expiry**: not enforced by verification; callers compare against their clock

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::codec::{
    decode_verified, peek_claims, peek_issuer, peek_payload, sign, sign_claims, try_verify,
    verify, verify_claims, ED25519_HEADER, EDDSA_HEADER,
};
pub use domain::errors::TicketError;
pub use domain::extract::{
    extract_token, fingerprint, issuer_for, normalize_issuer, random_ticket_id, ISSUER_LEN,
    TICKET_ID_LEN,
};
pub use domain::key_store::{verify_with_store, KeyStore};
pub use ports::inbound::TicketApi;
pub use service::{TicketService, TicketStats, TicketStatsReporter, TicketStatsSnapshot};
