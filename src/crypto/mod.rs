//! Cryptographic operations for the oracle relay
//!
//! Uses RSA PKCS#1 v1.5 with SHA-256 for attestation signatures.

mod keys;
mod signing;

pub use keys::*;
pub use signing::*;

#[cfg(test)]
pub(crate) use keys::test_keys;
