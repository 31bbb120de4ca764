//! # Adapters Layer
//!
//! File system access for key material.

pub mod files;
