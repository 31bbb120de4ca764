//! # Tollgate Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Signing, verification and container parsing
//! └── src/integration/  # Key files through issuance, verification and pricing
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tg-tests
//! cargo bench -p tg-tests
//! ```

pub mod integration;

use std::path::PathBuf;

/// Path of a key fixture shipped with the key container crate.
pub fn key_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../crates/tg-01-key-container/tests/fixtures")
        .join(name)
}
