//! Credential loading
//!
//! Both credentials are startup preconditions: if either fails to load the
//! relay must not start.

mod wallet;

pub use wallet::*;

pub use crate::crypto::{read_signing_key, SigningKey};

use tracing::info;

use crate::config::PathSettings;
use crate::models::RelayResult;

/// Key material held for the lifetime of the process
#[derive(Debug, Clone)]
pub struct Credentials {
    pub wallet: WalletSecret,
    pub signing_key: SigningKey,
}

impl Credentials {
    /// Load the wallet secret and the RSA signing key named in `paths`
    pub fn load(paths: &PathSettings) -> RelayResult<Self> {
        let wallet = read_wallet(&paths.wallet_path)?;
        let signing_key = read_signing_key(&paths.rsa_key_path)?;

        info!(
            "Loaded credentials ({}-bit signing key)",
            signing_key.size() * 8
        );

        Ok(Self {
            wallet,
            signing_key,
        })
    }
}
