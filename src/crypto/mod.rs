//! Cryptographic building blocks
//!
//! AES-256-GCM encryption with PBKDF2-HMAC-SHA256 (default) or Argon2id key
//! derivation, a self-describing envelope format, and text encodings for
//! string-typed callers.

pub mod cipher;
pub mod encoding;
pub mod envelope;
pub mod key_derivation;
pub mod secure_memory;

pub use cipher::{open, seal};
pub use encoding::TextEncoding;
pub use envelope::{Envelope, FORMAT_VERSION, NONCE_SIZE, TAG_SIZE};
pub use key_derivation::{
    derive_key, DerivedKey, Kdf, KeyDerivationParams, KEY_SIZE, KEY_SIZE_BITS, SALT_SIZE,
};
pub use secure_memory::SecureString;
