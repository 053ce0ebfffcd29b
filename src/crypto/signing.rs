//! RSA PKCS#1 v1.5 signing and verification of pre-hashed digests

use rand::rngs::OsRng;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::Sha256;

use super::SigningKey;
use crate::models::{Digest, RelayError, RelayResult, Signature, DIGEST_SIZE};

fn check_digest(digest: &[u8]) -> RelayResult<()> {
    if digest.len() != DIGEST_SIZE {
        return Err(RelayError::InvalidDigestSize {
            expected: DIGEST_SIZE,
            actual: digest.len(),
        });
    }
    Ok(())
}

/// Sign a SHA-256 digest with the relay's key.
///
/// The digest is signed as-is (it is not hashed again) with the SHA-256
/// DigestInfo prefix, and the signature is returned as padded base64.
pub fn sign(key: &SigningKey, digest: &[u8]) -> RelayResult<Signature> {
    check_digest(digest)?;

    let raw = key
        .rsa()
        .sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha256>(), digest)?;

    Ok(Signature::from_bytes(&raw))
}

/// Sign a [`Digest`]
pub fn sign_digest(key: &SigningKey, digest: &Digest) -> RelayResult<Signature> {
    sign(key, digest.as_ref())
}

/// Verify a signature produced by [`sign`]
pub fn verify(public_key: &RsaPublicKey, digest: &[u8], signature: &Signature) -> RelayResult<bool> {
    check_digest(digest)?;
    let signature_bytes = signature.to_bytes()?;

    Ok(public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), digest, &signature_bytes)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::super::keys::test_keys::rsa_key;
    use super::*;
    use std::thread;

    fn test_key() -> SigningKey {
        SigningKey::from(rsa_key())
    }

    #[test]
    fn test_sign_and_verify() {
        let key = test_key();
        let digest = Digest::sha256(b"Hello, relay!");

        let signature = sign_digest(&key, &digest).unwrap();
        assert!(!signature.as_str().is_empty());
        assert_eq!(signature.to_bytes().unwrap().len(), key.size());

        let is_valid = verify(&key.public_key(), digest.as_ref(), &signature).unwrap();
        assert!(is_valid);
    }

    #[test]
    fn test_signature_is_deterministic() {
        let key = test_key();
        let digest = Digest::sha256(b"block 482931");

        let first = sign_digest(&key, &digest).unwrap();
        let second = sign_digest(&key, &digest).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_verify_wrong_digest() {
        let key = test_key();
        let signature = sign_digest(&key, &Digest::sha256(b"data")).unwrap();

        let other = Digest::sha256(b"other data");
        let is_valid = verify(&key.public_key(), other.as_ref(), &signature).unwrap();
        assert!(!is_valid);
    }

    #[test]
    fn test_digest_is_not_rehashed() {
        use rsa::traits::PublicKeyParts;
        use rsa::BigUint;

        let key = test_key();
        let digest = Digest::sha256(b"payload");
        let signature = sign_digest(&key, &digest).unwrap();

        // Undo the RSA operation and check the padded message ends with the
        // digest we supplied.
        let public_key = key.public_key();
        let s = BigUint::from_bytes_be(&signature.to_bytes().unwrap());
        let em = s.modpow(public_key.e(), public_key.n()).to_bytes_be();
        assert!(em.ends_with(digest.as_bytes()));
    }

    #[test]
    fn test_sign_rejects_wrong_digest_size() {
        let key = test_key();

        for len in [0usize, 16, 31, 33, 48, 64] {
            let err = sign(&key, &vec![1u8; len]).unwrap_err();
            assert!(matches!(
                err,
                RelayError::InvalidDigestSize { expected: 32, actual } if actual == len
            ));
        }
    }

    #[test]
    fn test_verify_rejects_bad_encoding() {
        let key = test_key();
        let digest = Digest::sha256(b"x");
        let garbage = Signature::from("%%%".to_string());
        assert!(verify(&key.public_key(), digest.as_ref(), &garbage).is_err());
    }

    #[test]
    fn test_concurrent_signing() {
        let key = test_key();
        let public_key = key.public_key();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4u8)
                .map(|i| {
                    let key = &key;
                    scope.spawn(move || {
                        let digest = Digest::sha256(&[i]);
                        (digest, sign_digest(key, &digest).unwrap())
                    })
                })
                .collect();

            for handle in handles {
                let (digest, signature) = handle.join().unwrap();
                assert!(verify(&public_key, digest.as_ref(), &signature).unwrap());
            }
        });
    }
}
