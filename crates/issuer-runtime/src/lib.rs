//! # Issuer Runtime
//!
//! Configuration and startup wiring for the `tollgate-issuer` binary.

pub mod config;
pub mod runtime;

pub use config::{ConfigError, IssuerConfig};
pub use runtime::{build_key_store, IssuedTicket, IssuerRuntime, RuntimeError};
