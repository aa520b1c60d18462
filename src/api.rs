//! Passphrase encryption entry points
//!
//! Byte-typed calls return the raw envelope; text-typed calls return it
//! text-encoded. Passphrases may be given as `&str`, `String`, `&[u8]`,
//! `Vec<u8>` or [`SecureString`](crate::crypto::SecureString); a string and
//! its UTF-8 bytes are the same passphrase.

use crate::crypto::{open, seal, Kdf, TextEncoding};
use crate::error::{SimpleCryptError, SimpleCryptResult};

/// Parameters for a [`PassphraseCipher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CipherConfig {
    /// Key derivation used when encrypting
    pub kdf: Kdf,
    /// Encoding used by the text-typed calls
    pub text_encoding: TextEncoding,
}

/// Stateless passphrase cipher
///
/// Holds only configuration; keys are derived per call and dropped
/// (zeroized) before the call returns. Decryption reads the KDF parameters
/// from the envelope, so any configuration can decrypt any envelope as long
/// as the text encoding matches.
#[derive(Debug, Clone, Default)]
pub struct PassphraseCipher {
    config: CipherConfig,
}

impl PassphraseCipher {
    /// Create a cipher with the given configuration
    pub fn new(config: CipherConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    /// Encrypt bytes, returning the raw envelope
    pub fn encrypt(
        &self,
        plaintext: impl AsRef<[u8]>,
        passphrase: impl AsRef<[u8]>,
    ) -> SimpleCryptResult<Vec<u8>> {
        seal(plaintext.as_ref(), passphrase.as_ref(), &self.config.kdf)
    }

    /// Decrypt a raw envelope
    pub fn decrypt(
        &self,
        ciphertext: impl AsRef<[u8]>,
        passphrase: impl AsRef<[u8]>,
    ) -> SimpleCryptResult<Vec<u8>> {
        open(ciphertext.as_ref(), passphrase.as_ref())
    }

    /// Encrypt a string, returning the text-encoded envelope
    pub fn encrypt_text(&self, text: &str, passphrase: impl AsRef<[u8]>) -> SimpleCryptResult<String> {
        let sealed = self.encrypt(text.as_bytes(), passphrase)?;
        Ok(self.config.text_encoding.encode(&sealed))
    }

    /// Decrypt a text-encoded envelope back into a string
    ///
    /// Fails with [`SimpleCryptError::Encoding`] if the input is not valid
    /// in the configured encoding or if the plaintext is not UTF-8. Use
    /// [`decrypt`](Self::decrypt) for arbitrary binary plaintext.
    pub fn decrypt_text(
        &self,
        encoded: &str,
        passphrase: impl AsRef<[u8]>,
    ) -> SimpleCryptResult<String> {
        let ciphertext = self.config.text_encoding.decode(encoded)?;
        let plaintext = self.decrypt(ciphertext, passphrase)?;
        String::from_utf8(plaintext).map_err(|e| {
            SimpleCryptError::Encoding(format!("Decrypted data is not valid UTF-8: {}", e))
        })
    }
}

/// Encrypt bytes with the default configuration
pub fn encrypt(
    plaintext: impl AsRef<[u8]>,
    passphrase: impl AsRef<[u8]>,
) -> SimpleCryptResult<Vec<u8>> {
    PassphraseCipher::default().encrypt(plaintext, passphrase)
}

/// Decrypt bytes produced by [`encrypt`]
pub fn decrypt(
    ciphertext: impl AsRef<[u8]>,
    passphrase: impl AsRef<[u8]>,
) -> SimpleCryptResult<Vec<u8>> {
    PassphraseCipher::default().decrypt(ciphertext, passphrase)
}

/// Encrypt a string with the default configuration, hex-encoding the result
pub fn encrypt_text(text: &str, passphrase: impl AsRef<[u8]>) -> SimpleCryptResult<String> {
    PassphraseCipher::default().encrypt_text(text, passphrase)
}

/// Decrypt a hex-encoded string produced by [`encrypt_text`]
pub fn decrypt_text(encoded: &str, passphrase: impl AsRef<[u8]>) -> SimpleCryptResult<String> {
    PassphraseCipher::default().decrypt_text(encoded, passphrase)
}
