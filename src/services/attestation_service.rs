//! Attestation service wiring credentials, signer and checkpoint together

use rsa::RsaPublicKey;
use tracing::{debug, info};

use crate::checkpoint::Checkpoint;
use crate::config::Settings;
use crate::credentials::{Credentials, WalletSecret};
use crate::crypto::{sign, SigningKey};
use crate::models::{RelayResult, Signature};

/// What the relay's processing loop talks to.
///
/// Built once at startup; a failure anywhere in [`AttestationService::start`]
/// means the relay must not enter its main loop.
#[derive(Debug)]
pub struct AttestationService {
    credentials: Credentials,
    checkpoint: Checkpoint,
}

impl AttestationService {
    /// Validate settings, load credentials and read the resume offset
    pub fn start(settings: &Settings) -> RelayResult<Self> {
        settings.validate()?;

        let credentials = Credentials::load(&settings.paths)?;
        let checkpoint = Checkpoint::open(&settings.paths.offset_path)?;

        info!(
            "Attestation service ready at offset {}",
            checkpoint.resume_offset()
        );

        Ok(Self {
            credentials,
            checkpoint,
        })
    }

    /// Offset to resume streaming from
    pub fn resume_offset(&self) -> u64 {
        self.checkpoint.resume_offset()
    }

    /// Last persisted offset
    pub fn current_offset(&self) -> u64 {
        self.checkpoint.current()
    }

    pub fn wallet(&self) -> &WalletSecret {
        &self.credentials.wallet
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.credentials.signing_key
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.credentials.signing_key.public_key()
    }

    /// Sign a 32-byte digest for submission
    pub fn sign(&self, digest: &[u8]) -> RelayResult<Signature> {
        let signature = sign(&self.credentials.signing_key, digest)?;
        debug!("signed digest ({} bytes)", digest.len());
        Ok(signature)
    }

    /// Record that everything before `offset` has been processed
    pub fn commit(&self, offset: u64) -> RelayResult<()> {
        self.checkpoint.commit(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::read_offset;
    use crate::config::{ChainSettings, PathSettings, ServerSettings};
    use crate::crypto::test_keys::rsa_key_pem;
    use crate::crypto::verify;
    use crate::models::{Digest, RelayError};
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn setup_settings(offset: &str) -> (Settings, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let join = |name: &str| temp_dir.path().join(name).display().to_string();

        let settings = Settings {
            paths: PathSettings {
                offset_path: join("offset"),
                wallet_path: join("wallet"),
                rsa_key_path: join("rsa.pem"),
            },
            server: ServerSettings::default(),
            chain: ChainSettings::default(),
        };

        fs::write(&settings.paths.offset_path, offset).unwrap();
        fs::write(&settings.paths.wallet_path, "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ\n").unwrap();
        fs::write(&settings.paths.rsa_key_path, rsa_key_pem()).unwrap();

        (settings, temp_dir)
    }

    #[test]
    fn test_resume_process_and_restart() {
        let (settings, _temp) = setup_settings("100");
        let service = AttestationService::start(&settings).unwrap();
        assert_eq!(service.resume_offset(), 100);
        assert_eq!(
            service.wallet().expose(),
            "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ"
        );

        for record in service.resume_offset()..102 {
            let digest = Digest::sha256(format!("record {}", record).as_bytes());
            let signature = service.sign(digest.as_ref()).unwrap();
            assert!(verify(&service.public_key(), digest.as_ref(), &signature).unwrap());

            service.commit(record + 1).unwrap();
        }

        assert_eq!(service.current_offset(), 102);
        assert_eq!(read_offset(&settings.paths.offset_path).unwrap(), 102);

        // A restart picks up where the previous run left off.
        let restarted = AttestationService::start(&settings).unwrap();
        assert_eq!(restarted.resume_offset(), 102);
    }

    #[test]
    fn test_start_aborts_on_corrupt_key() {
        let (settings, _temp) = setup_settings("0\n");
        let pem_doc = rsa_key_pem();
        fs::write(&settings.paths.rsa_key_path, &pem_doc[..pem_doc.len() / 2]).unwrap();

        let err = AttestationService::start(&settings).unwrap_err();
        assert!(matches!(err, RelayError::InvalidKey(_)));
    }

    #[test]
    fn test_start_aborts_on_corrupt_offset() {
        let (settings, _temp) = setup_settings("abc");
        let err = AttestationService::start(&settings).unwrap_err();
        assert!(matches!(err, RelayError::InvalidOffset { .. }));
    }

    #[test]
    fn test_start_aborts_on_empty_path() {
        let (mut settings, _temp) = setup_settings("0");
        settings.paths.wallet_path = String::new();

        let err = AttestationService::start(&settings).unwrap_err();
        assert!(matches!(err, RelayError::ConfigError(_)));
    }

    #[test]
    fn test_sign_error_is_returned() {
        let (settings, _temp) = setup_settings("0");
        let service = AttestationService::start(&settings).unwrap();

        let err = service.sign(&[0u8; 20]).unwrap_err();
        assert!(matches!(err, RelayError::InvalidDigestSize { .. }));

        // The service keeps working after a failed attestation.
        assert!(service.sign(Digest::sha256(b"next").as_ref()).is_ok());
    }

    #[test]
    fn test_shared_across_threads() {
        let (settings, _temp) = setup_settings("0");
        let service = Arc::new(AttestationService::start(&settings).unwrap());

        let handles: Vec<_> = (1..=4u64)
            .map(|n| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    let digest = Digest::sha256(&n.to_be_bytes());
                    service.sign(digest.as_ref()).unwrap();
                    let _ = service.commit(n);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            read_offset(&settings.paths.offset_path).unwrap(),
            service.current_offset()
        );
    }
}
