//! RSA signing key loading

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::{RelayError, RelayResult};

/// An RSA private key used to attest relayed data
#[derive(Clone)]
pub struct SigningKey {
    inner: RsaPrivateKey,
}

impl SigningKey {
    /// Load a PEM-wrapped PKCS#1 private key from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RelayResult<Self> {
        let path = path.as_ref();
        debug!("reading signing key from {}", path.display());

        let data = fs::read(path).map_err(|e| RelayError::io(path, e))?;
        Self::from_pem(&data)
    }

    /// Parse the first PEM block of `data` as a PKCS#1 private key.
    ///
    /// The block label is not checked, only its DER contents.
    pub fn from_pem(data: &[u8]) -> RelayResult<Self> {
        let block = pem::parse(data)
            .map_err(|e| RelayError::InvalidKey(format!("No usable PEM block: {}", e)))?;

        Self::from_pkcs1_der(block.contents())
    }

    /// Parse a DER-encoded PKCS#1 private key
    pub fn from_pkcs1_der(der: &[u8]) -> RelayResult<Self> {
        let inner = RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| RelayError::InvalidKey(format!("Invalid PKCS#1 key: {}", e)))?;

        inner
            .validate()
            .map_err(|e| RelayError::InvalidKey(format!("Inconsistent RSA key: {}", e)))?;

        Ok(Self { inner })
    }

    /// Modulus size in bytes, which is also the signature length
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Get the public half of the key
    pub fn public_key(&self) -> RsaPublicKey {
        self.inner.to_public_key()
    }

    pub(crate) fn rsa(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

impl From<RsaPrivateKey> for SigningKey {
    fn from(inner: RsaPrivateKey) -> Self {
        Self { inner }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("bits", &(self.size() * 8))
            .finish()
    }
}

/// Read the signing key at `path`
pub fn read_signing_key<P: AsRef<Path>>(path: P) -> RelayResult<SigningKey> {
    SigningKey::load_from_file(path)
}
