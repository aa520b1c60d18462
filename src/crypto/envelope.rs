//! Self-describing ciphertext layout
//!
//! ```text
//! version (1) | kdf id (1) | kdf costs (4 or 12) | salt (16) | nonce (12) | ciphertext + tag
//! ```
//!
//! All integers are big-endian. Everything before the ciphertext is the
//! header; it is authenticated as AES-GCM associated data.

use crate::error::{SimpleCryptError, SimpleCryptResult};

use super::key_derivation::{Kdf, KeyDerivationParams, SALT_SIZE};

/// Current envelope format version
pub const FORMAT_VERSION: u8 = 1;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

const KDF_ID_PBKDF2_SHA256: u8 = 1;
const KDF_ID_ARGON2ID: u8 = 2;

/// A parsed ciphertext envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Parameters needed to re-derive the key
    pub params: KeyDerivationParams,
    /// Nonce used for this encryption
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with the authentication tag appended
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Serialize the header for the given parameters and nonce
    pub fn header(params: &KeyDerivationParams, nonce: &[u8; NONCE_SIZE]) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + 12 + SALT_SIZE + NONCE_SIZE);
        out.push(FORMAT_VERSION);

        match params.kdf {
            Kdf::Pbkdf2Sha256 { iterations } => {
                out.push(KDF_ID_PBKDF2_SHA256);
                out.extend_from_slice(&iterations.to_be_bytes());
            }
            Kdf::Argon2id {
                memory_cost,
                time_cost,
                parallelism,
            } => {
                out.push(KDF_ID_ARGON2ID);
                out.extend_from_slice(&memory_cost.to_be_bytes());
                out.extend_from_slice(&time_cost.to_be_bytes());
                out.extend_from_slice(&parallelism.to_be_bytes());
            }
        }

        out.extend_from_slice(&params.salt);
        out.extend_from_slice(nonce);
        out
    }

    /// Serialize this envelope's header
    pub fn header_bytes(&self) -> Vec<u8> {
        Self::header(&self.params, &self.nonce)
    }

    /// Serialize the full envelope
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.header_bytes();
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse an envelope from raw bytes
    ///
    /// # Errors
    ///
    /// - [`SimpleCryptError::UnsupportedAlgorithm`] for an unknown format
    ///   version or KDF id
    /// - [`SimpleCryptError::Transform`] if the data is truncated or the
    ///   KDF costs are out of range
    pub fn from_bytes(data: &[u8]) -> SimpleCryptResult<Self> {
        let mut reader = Reader::new(data);

        let version = reader.u8()?;
        if version != FORMAT_VERSION {
            return Err(SimpleCryptError::UnsupportedAlgorithm(format!(
                "Unsupported envelope version: {}",
                version
            )));
        }

        let kdf = match reader.u8()? {
            KDF_ID_PBKDF2_SHA256 => Kdf::Pbkdf2Sha256 {
                iterations: reader.u32()?,
            },
            KDF_ID_ARGON2ID => Kdf::Argon2id {
                memory_cost: reader.u32()?,
                time_cost: reader.u32()?,
                parallelism: reader.u32()?,
            },
            other => {
                return Err(SimpleCryptError::UnsupportedAlgorithm(format!(
                    "Unknown key derivation function id: {}",
                    other
                )))
            }
        };

        // Costs come from unauthenticated bytes; refuse them before any
        // key derivation runs.
        kdf.validate().map_err(|e| {
            SimpleCryptError::Transform(format!("Corrupted envelope header: {}", e))
        })?;

        let salt = reader.array::<SALT_SIZE>()?;
        let nonce = reader.array::<NONCE_SIZE>()?;

        let ciphertext = reader.rest();
        if ciphertext.len() < TAG_SIZE {
            return Err(SimpleCryptError::Transform(format!(
                "Ciphertext too short: expected at least {} bytes after header, got {}",
                TAG_SIZE,
                ciphertext.len()
            )));
        }

        Ok(Self {
            params: KeyDerivationParams::with_salt(kdf, salt),
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> SimpleCryptResult<&'a [u8]> {
        let end = self.pos + len;
        if end > self.data.len() {
            return Err(SimpleCryptError::Transform(format!(
                "Ciphertext too short: truncated header at byte {}",
                self.pos
            )));
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> SimpleCryptResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> SimpleCryptResult<u32> {
        Ok(u32::from_be_bytes(self.array::<4>()?))
    }

    fn array<const N: usize>(&mut self) -> SimpleCryptResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }
}
