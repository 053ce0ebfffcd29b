//! Oracle Relay - credential and checkpoint layer
//!
//! The part of a blockchain data-relay oracle that:
//! - loads the wallet secret and RSA signing key
//! - persists the stream offset so processing resumes after a restart
//! - signs digests of relayed data for a downstream verifier

pub mod checkpoint;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use checkpoint::{read_offset, write_offset, Checkpoint};
pub use config::Settings;
pub use credentials::{read_wallet, Credentials, WalletSecret};
pub use crypto::{read_signing_key, sign, verify, SigningKey};
pub use models::{Digest, RelayError, RelayResult, Signature};
pub use services::AttestationService;

/// Version of the oracle relay
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
