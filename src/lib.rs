//! simplecrypt - passphrase-based encryption for bytes and strings
//!
//! Each call derives a 256-bit key from a passphrase, encrypts or decrypts
//! once with AES-256-GCM, and returns either raw bytes or text-encoded
//! bytes. Calls are independent: there is no key cache and no shared state.
//!
//! # Architecture
//!
//! - `api`: the encrypt/decrypt entry points (re-exported at the root)
//! - `crypto`: key derivation, the AES-GCM transform, the ciphertext
//!   envelope and text encodings
//! - `config`: JSON settings for the command-line tool
//! - `cli`: command handlers for the `simplecrypt` binary
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust,no_run
//! let ciphertext = simplecrypt::encrypt_text("hello world", "mypassword")?;
//! let plaintext = simplecrypt::decrypt_text(&ciphertext, "mypassword")?;
//! assert_eq!(plaintext, "hello world");
//! # Ok::<(), simplecrypt::SimpleCryptError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;

pub use api::{decrypt, decrypt_text, encrypt, encrypt_text, CipherConfig, PassphraseCipher};
pub use crypto::{Kdf, TextEncoding, KEY_SIZE_BITS};
pub use error::{SimpleCryptError, SimpleCryptResult};
