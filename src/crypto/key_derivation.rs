//! Key derivation from passphrases
//!
//! Turns a passphrase into a 256-bit AES key. PBKDF2-HMAC-SHA256 is the
//! default; Argon2id is available for callers who want a memory-hard KDF.
//! The salt and cost parameters travel with every ciphertext, so the same
//! passphrase always re-derives the same key on decryption.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;
use zeroize::ZeroizeOnDrop;

use crate::error::{SimpleCryptError, SimpleCryptResult};

/// Size of the derived key in bits
pub const KEY_SIZE_BITS: usize = 256;

/// Size of the derived key in bytes
pub const KEY_SIZE: usize = KEY_SIZE_BITS / 8;

/// Size of the random salt in bytes
pub const SALT_SIZE: usize = 16;

/// Default PBKDF2 iteration count
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 600_000;

/// Default Argon2 memory cost in KiB (64 MiB)
pub const DEFAULT_ARGON2_MEMORY_COST: u32 = 65536;

/// Default Argon2 time cost (passes)
pub const DEFAULT_ARGON2_TIME_COST: u32 = 3;

/// Default Argon2 parallelism degree
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 4;

/// Largest accepted PBKDF2 iteration count
pub const MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;

/// Largest accepted Argon2 memory cost in KiB (1 GiB)
pub const MAX_ARGON2_MEMORY_COST: u32 = 1024 * 1024;

/// Largest accepted Argon2 time cost
pub const MAX_ARGON2_TIME_COST: u32 = 64;

/// Largest accepted Argon2 parallelism degree
pub const MAX_ARGON2_PARALLELISM: u32 = 64;

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_PBKDF2_ITERATIONS
}

fn default_argon2_memory_cost() -> u32 {
    DEFAULT_ARGON2_MEMORY_COST
}

fn default_argon2_time_cost() -> u32 {
    DEFAULT_ARGON2_TIME_COST
}

fn default_argon2_parallelism() -> u32 {
    DEFAULT_ARGON2_PARALLELISM
}

/// Key derivation function and its cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "kebab-case")]
pub enum Kdf {
    /// PBKDF2 with HMAC-SHA256
    Pbkdf2Sha256 {
        /// Iteration count
        #[serde(default = "default_pbkdf2_iterations")]
        iterations: u32,
    },
    /// Argon2id (version 0x13)
    Argon2id {
        /// Memory cost in KiB
        #[serde(default = "default_argon2_memory_cost")]
        memory_cost: u32,
        /// Time cost (passes)
        #[serde(default = "default_argon2_time_cost")]
        time_cost: u32,
        /// Parallelism degree
        #[serde(default = "default_argon2_parallelism")]
        parallelism: u32,
    },
}

impl Default for Kdf {
    fn default() -> Self {
        Self::pbkdf2()
    }
}

impl Kdf {
    /// PBKDF2-HMAC-SHA256 with the default iteration count
    pub fn pbkdf2() -> Self {
        Self::Pbkdf2Sha256 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }

    /// Argon2id with the default costs
    pub fn argon2id() -> Self {
        Self::Argon2id {
            memory_cost: DEFAULT_ARGON2_MEMORY_COST,
            time_cost: DEFAULT_ARGON2_TIME_COST,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }

    /// Human-readable algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pbkdf2Sha256 { .. } => "PBKDF2-HMAC-SHA256",
            Self::Argon2id { .. } => "Argon2id",
        }
    }

    /// Check that the cost parameters are usable
    ///
    /// Costs are bounded above as well as below: they are read from
    /// ciphertext headers before anything is authenticated.
    pub fn validate(&self) -> SimpleCryptResult<()> {
        match *self {
            Self::Pbkdf2Sha256 { iterations } => {
                if !(1..=MAX_PBKDF2_ITERATIONS).contains(&iterations) {
                    return Err(SimpleCryptError::KeyDerivation(format!(
                        "PBKDF2 iteration count must be between 1 and {}, got {}",
                        MAX_PBKDF2_ITERATIONS, iterations
                    )));
                }
                Ok(())
            }
            Self::Argon2id {
                memory_cost,
                time_cost,
                parallelism,
            } => {
                check_max("Argon2 memory cost", memory_cost, MAX_ARGON2_MEMORY_COST)?;
                check_max("Argon2 time cost", time_cost, MAX_ARGON2_TIME_COST)?;
                check_max("Argon2 parallelism", parallelism, MAX_ARGON2_PARALLELISM)?;
                argon2_params(memory_cost, time_cost, parallelism).map(|_| ())
            }
        }
    }
}

fn check_max(what: &str, value: u32, max: u32) -> SimpleCryptResult<()> {
    if value > max {
        return Err(SimpleCryptError::KeyDerivation(format!(
            "{} must be at most {}, got {}",
            what, max, value
        )));
    }
    Ok(())
}

fn argon2_params(memory_cost: u32, time_cost: u32, parallelism: u32) -> SimpleCryptResult<Params> {
    Params::new(memory_cost, time_cost, parallelism, Some(KEY_SIZE))
        .map_err(|e| SimpleCryptError::KeyDerivation(format!("Invalid Argon2 parameters: {}", e)))
}

/// Everything needed to re-derive a key from a passphrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDerivationParams {
    /// Algorithm and costs
    pub kdf: Kdf,
    /// Per-message random salt
    pub salt: [u8; SALT_SIZE],
}

impl KeyDerivationParams {
    /// Create new params with a random salt
    pub fn new(kdf: Kdf) -> Self {
        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);
        Self { kdf, salt }
    }

    /// Create params with a specific salt
    pub fn with_salt(kdf: Kdf, salt: [u8; SALT_SIZE]) -> Self {
        Self { kdf, salt }
    }
}

/// A derived 256-bit encryption key
///
/// The key bytes are zeroized when the value is dropped and never appear
/// in `Debug` output.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase
///
/// The passphrase is a character sequence, so byte passphrases must be
/// valid UTF-8. A `&str` passphrase and its UTF-8 bytes derive the same key.
///
/// # Errors
///
/// - [`SimpleCryptError::Encoding`] if the passphrase is not UTF-8
/// - [`SimpleCryptError::KeyDerivation`] if the cost parameters are invalid
///   or the KDF fails
pub fn derive_key(passphrase: &[u8], params: &KeyDerivationParams) -> SimpleCryptResult<DerivedKey> {
    let passphrase = std::str::from_utf8(passphrase).map_err(|e| {
        SimpleCryptError::Encoding(format!("Passphrase is not valid UTF-8: {}", e))
    })?;

    params.kdf.validate()?;

    debug!(algorithm = params.kdf.name(), "deriving key");

    let mut derived = DerivedKey {
        key: [0u8; KEY_SIZE],
    };

    match params.kdf {
        Kdf::Pbkdf2Sha256 { iterations } => {
            pbkdf2::pbkdf2_hmac::<Sha256>(
                passphrase.as_bytes(),
                &params.salt,
                iterations,
                &mut derived.key,
            );
        }
        Kdf::Argon2id {
            memory_cost,
            time_cost,
            parallelism,
        } => {
            let argon2 = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                argon2_params(memory_cost, time_cost, parallelism)?,
            );

            argon2
                .hash_password_into(passphrase.as_bytes(), &params.salt, &mut derived.key)
                .map_err(|e| {
                    SimpleCryptError::KeyDerivation(format!("Key derivation failed: {}", e))
                })?;
        }
    }

    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_pbkdf2() -> Kdf {
        Kdf::Pbkdf2Sha256 { iterations: 1000 }
    }

    fn fast_argon2() -> Kdf {
        Kdf::Argon2id {
            memory_cost: 256,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_derive_key() {
        let params = KeyDerivationParams::new(fast_pbkdf2());
        let key = derive_key(b"test_passphrase", &params).unwrap();
        assert_eq!(key.as_bytes().len() * 8, KEY_SIZE_BITS);
    }

    #[test]
    fn test_same_passphrase_same_key() {
        for kdf in [fast_pbkdf2(), fast_argon2()] {
            let params = KeyDerivationParams::new(kdf);
            let key1 = derive_key(b"test_passphrase", &params).unwrap();
            let key2 = derive_key(b"test_passphrase", &params).unwrap();
            assert_eq!(key1.as_bytes(), key2.as_bytes());
        }
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let params = KeyDerivationParams::new(fast_pbkdf2());
        let key1 = derive_key(b"passphrase1", &params).unwrap();
        let key2 = derive_key(b"passphrase2", &params).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let params1 = KeyDerivationParams::with_salt(fast_pbkdf2(), [1u8; SALT_SIZE]);
        let params2 = KeyDerivationParams::with_salt(fast_pbkdf2(), [2u8; SALT_SIZE]);
        let key1 = derive_key(b"same_passphrase", &params1).unwrap();
        let key2 = derive_key(b"same_passphrase", &params2).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_kdf_choice_changes_key() {
        let salt = [7u8; SALT_SIZE];
        let key1 = derive_key(b"pw", &KeyDerivationParams::with_salt(fast_pbkdf2(), salt)).unwrap();
        let key2 = derive_key(b"pw", &KeyDerivationParams::with_salt(fast_argon2(), salt)).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_random_salts_differ() {
        let params1 = KeyDerivationParams::new(fast_pbkdf2());
        let params2 = KeyDerivationParams::new(fast_pbkdf2());
        assert_ne!(params1.salt, params2.salt);
    }

    #[test]
    fn test_empty_passphrase_allowed() {
        let params = KeyDerivationParams::new(fast_pbkdf2());
        assert!(derive_key(b"", &params).is_ok());
    }

    #[test]
    fn test_invalid_utf8_passphrase() {
        let params = KeyDerivationParams::new(fast_pbkdf2());
        let err = derive_key(&[0xff, 0xfe, 0xfd], &params).unwrap_err();
        assert!(matches!(err, SimpleCryptError::Encoding(_)));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let params = KeyDerivationParams::new(Kdf::Pbkdf2Sha256 { iterations: 0 });
        let err = derive_key(b"pw", &params).unwrap_err();
        assert!(matches!(err, SimpleCryptError::KeyDerivation(_)));
    }

    #[test]
    fn test_invalid_argon2_params_rejected() {
        let kdf = Kdf::Argon2id {
            memory_cost: 1,
            time_cost: 0,
            parallelism: 0,
        };
        assert!(kdf.validate().is_err());
        let err = derive_key(b"pw", &KeyDerivationParams::new(kdf)).unwrap_err();
        assert!(matches!(err, SimpleCryptError::KeyDerivation(_)));
    }

    #[test]
    fn test_cost_upper_bounds() {
        let too_many = Kdf::Pbkdf2Sha256 {
            iterations: MAX_PBKDF2_ITERATIONS + 1,
        };
        assert!(too_many.validate().is_err());
        assert!(Kdf::Pbkdf2Sha256 {
            iterations: MAX_PBKDF2_ITERATIONS
        }
        .validate()
        .is_ok());

        let argon = |memory_cost, time_cost, parallelism| Kdf::Argon2id {
            memory_cost,
            time_cost,
            parallelism,
        };
        assert!(argon(MAX_ARGON2_MEMORY_COST + 1, 1, 1).validate().is_err());
        assert!(argon(1024, MAX_ARGON2_TIME_COST + 1, 1).validate().is_err());
        assert!(argon(1024 * 128, 1, MAX_ARGON2_PARALLELISM + 1).validate().is_err());
        assert!(argon(u32::MAX, u32::MAX, u32::MAX).validate().is_err());
        assert!(Kdf::argon2id().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = derive_key(b"pw", &KeyDerivationParams::new(fast_pbkdf2())).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_kdf_serde() {
        let json = serde_json::to_string(&Kdf::pbkdf2()).unwrap();
        assert_eq!(json, r#"{"algorithm":"pbkdf2-sha256","iterations":600000}"#);

        let kdf: Kdf = serde_json::from_str(r#"{"algorithm":"argon2id"}"#).unwrap();
        assert_eq!(kdf, Kdf::argon2id());
    }
}
