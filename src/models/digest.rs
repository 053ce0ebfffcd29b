//! 256-bit digest supplied by the host for attestation

use sha2::{Digest as _, Sha256};

use super::{RelayError, RelayResult};

/// Size of a SHA-256 digest in bytes
pub const DIGEST_SIZE: usize = 32;

/// A pre-computed 256-bit digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Hash arbitrary data with SHA-256
    pub fn sha256(data: &[u8]) -> Self {
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes.copy_from_slice(&Sha256::digest(data));
        Self(bytes)
    }

    /// Wrap a digest slice, rejecting anything that is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> RelayResult<Self> {
        let array: [u8; DIGEST_SIZE] =
            bytes.try_into().map_err(|_| RelayError::InvalidDigestSize {
                expected: DIGEST_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest(")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
