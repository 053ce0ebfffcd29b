//! Data model for the oracle relay
//!
//! Digests going into the signer, signatures coming out, and the error type
//! shared by every module.

mod digest;
mod error;
mod signature;

pub use digest::*;
pub use error::*;
pub use signature::*;
