//! AES-256-GCM encryption/decryption under a passphrase
//!
//! `seal` derives a fresh key (random salt) and encrypts under a random
//! nonce; `open` re-derives the key from the envelope header and decrypts.
//! The header is authenticated along with the ciphertext.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use tracing::{debug, trace};

use crate::error::{SimpleCryptError, SimpleCryptResult};

use super::envelope::{Envelope, NONCE_SIZE};
use super::key_derivation::{derive_key, DerivedKey, Kdf, KeyDerivationParams};

fn new_cipher(key: &DerivedKey) -> SimpleCryptResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SimpleCryptError::InvalidKey(format!("Failed to create cipher: {}", e)))
}

/// Encrypt plaintext under a passphrase
///
/// Returns the serialized envelope. Every call uses a new salt and nonce,
/// so encrypting the same input twice gives different output.
pub fn seal(plaintext: &[u8], passphrase: &[u8], kdf: &Kdf) -> SimpleCryptResult<Vec<u8>> {
    let params = KeyDerivationParams::new(*kdf);
    let key = derive_key(passphrase, &params)?;
    let cipher = new_cipher(&key)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let header = Envelope::header(&params, &nonce_bytes);
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad: &header,
            },
        )
        .map_err(|e| SimpleCryptError::Transform(format!("Encryption failed: {}", e)))?;

    debug!(
        algorithm = kdf.name(),
        plaintext_len = plaintext.len(),
        "sealed envelope"
    );

    let envelope = Envelope {
        params,
        nonce: nonce_bytes,
        ciphertext,
    };
    Ok(envelope.to_bytes())
}

/// Decrypt an envelope produced by [`seal`]
///
/// # Errors
///
/// Fails with [`SimpleCryptError::Transform`] when the passphrase is wrong
/// or the data was modified. A wrong passphrase never produces output.
pub fn open(data: &[u8], passphrase: &[u8]) -> SimpleCryptResult<Vec<u8>> {
    let envelope = Envelope::from_bytes(data)?;
    trace!(
        algorithm = envelope.params.kdf.name(),
        ciphertext_len = envelope.ciphertext.len(),
        "parsed envelope"
    );

    let key = derive_key(passphrase, &envelope.params)?;
    let cipher = new_cipher(&key)?;

    let header = envelope.header_bytes();
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(&envelope.nonce),
            Payload {
                msg: &envelope.ciphertext,
                aad: &header,
            },
        )
        .map_err(|_| {
            SimpleCryptError::Transform(
                "Decryption failed: invalid passphrase or corrupted data".to_string(),
            )
        })?;

    debug!(plaintext_len = plaintext.len(), "opened envelope");
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::envelope::TAG_SIZE;

    fn fast_kdf() -> Kdf {
        Kdf::Pbkdf2Sha256 { iterations: 1000 }
    }

    #[test]
    fn test_seal_open() {
        let plaintext = b"Hello, World!";

        let sealed = seal(plaintext, b"test_passphrase", &fast_kdf()).unwrap();
        let opened = open(&sealed, b"test_passphrase").unwrap();

        assert_eq!(plaintext, opened.as_slice());
    }

    #[test]
    fn test_seal_open_argon2() {
        let kdf = Kdf::Argon2id {
            memory_cost: 256,
            time_cost: 1,
            parallelism: 1,
        };
        let sealed = seal(b"argon", b"pw", &kdf).unwrap();
        assert_eq!(open(&sealed, b"pw").unwrap(), b"argon");
    }

    #[test]
    fn test_different_salts_and_nonces() {
        let sealed1 = seal(b"same", b"pw", &fast_kdf()).unwrap();
        let sealed2 = seal(b"same", b"pw", &fast_kdf()).unwrap();

        let env1 = Envelope::from_bytes(&sealed1).unwrap();
        let env2 = Envelope::from_bytes(&sealed2).unwrap();
        assert_ne!(env1.params.salt, env2.params.salt);
        assert_ne!(env1.nonce, env2.nonce);
        assert_ne!(env1.ciphertext, env2.ciphertext);
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let sealed = seal(b"Hello, World!", b"right", &fast_kdf()).unwrap();
        let err = open(&sealed, b"wrong").unwrap_err();
        assert!(matches!(err, SimpleCryptError::Transform(_)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut sealed = seal(b"Hello, World!", b"pw", &fast_kdf()).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xff;
        assert!(open(&sealed, b"pw").is_err());
    }

    #[test]
    fn test_tampered_header_fails() {
        let sealed = seal(b"Hello, World!", b"pw", &fast_kdf()).unwrap();

        // Salt and nonce bytes
        for index in [6, 30] {
            let mut tampered = sealed.clone();
            tampered[index] ^= 0x01;
            let err = open(&tampered, b"pw").unwrap_err();
            assert!(matches!(err, SimpleCryptError::Transform(_)));
        }
    }

    #[test]
    fn test_tampered_iterations_fails() {
        let mut sealed = seal(b"Hello, World!", b"pw", &fast_kdf()).unwrap();
        // 1000 -> 1001
        sealed[5] ^= 0x01;
        assert!(open(&sealed, b"pw").is_err());
    }

    #[test]
    fn test_empty_plaintext() {
        let sealed = seal(b"", b"pw", &fast_kdf()).unwrap();
        let envelope = Envelope::from_bytes(&sealed).unwrap();
        assert_eq!(envelope.ciphertext.len(), TAG_SIZE);

        let opened = open(&sealed, b"pw").unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn test_large_plaintext() {
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();

        let sealed = seal(&plaintext, b"pw", &fast_kdf()).unwrap();
        let opened = open(&sealed, b"pw").unwrap();

        assert_eq!(plaintext, opened);
    }

    #[test]
    fn test_corrupted_iterations_fail_fast() {
        let mut sealed = seal(b"Hello, World!", b"pw", &fast_kdf()).unwrap();
        sealed[2..6].copy_from_slice(&u32::MAX.to_be_bytes());

        let started = std::time::Instant::now();
        let err = open(&sealed, b"pw").unwrap_err();
        assert!(matches!(err, SimpleCryptError::Transform(_)));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_garbage_input() {
        assert!(open(b"definitely not an envelope", b"pw").is_err());
        assert!(open(&[], b"pw").is_err());
    }
}
