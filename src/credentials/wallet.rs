//! Wallet secret (WIF) loading

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::{RelayError, RelayResult};

/// The wallet import format secret used by the host to authorize transactions.
///
/// Opaque to the relay: it is never validated, logged or written anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletSecret(String);

impl WalletSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the secret to the component that submits transactions
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for WalletSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WalletSecret(<redacted>)")
    }
}

/// Read the wallet secret at `path`, dropping the trailing newline and any
/// surrounding whitespace
pub fn read_wallet<P: AsRef<Path>>(path: P) -> RelayResult<WalletSecret> {
    let path = path.as_ref();
    debug!("reading wallet secret from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| RelayError::io(path, e))?;
    let secret = content.strip_suffix('\n').unwrap_or(&content).trim();

    Ok(WalletSecret::new(secret))
}
