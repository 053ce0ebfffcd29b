//! Base64-encoded attestation signature

use base64::{engine::general_purpose::STANDARD, Engine};

use super::{RelayError, RelayResult};

/// An RSA signature encoded as standard, padded base64
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Encode raw signature bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    /// Decode back to raw signature bytes
    pub fn to_bytes(&self) -> RelayResult<Vec<u8>> {
        STANDARD
            .decode(&self.0)
            .map_err(|e| RelayError::InvalidSignature(format!("Invalid base64: {}", e)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Signature {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_is_padded_standard_alphabet() {
        let signature = Signature::from_bytes(&[0xfb, 0xff]);
        assert_eq!(signature.as_str(), "+/8=");
        assert_eq!(signature.to_bytes().unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_invalid_base64() {
        let signature = Signature::from("not base64!".to_string());
        assert!(matches!(
            signature.to_bytes(),
            Err(RelayError::InvalidSignature(_))
        ));
    }
}
