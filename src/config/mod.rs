//! Configuration module for simplecrypt
//!
//! Settings choose the key derivation function and text encoding used by
//! the command-line front end. The library API takes a
//! [`CipherConfig`](crate::api::CipherConfig) directly and never reads
//! configuration on its own.

pub mod settings;

pub use settings::Settings;
