//! CLI command handlers
//!
//! Bridges the clap argument parsing in `main.rs` with the library API.

pub mod config;
pub mod crypt;

pub use config::{handle_config_command, ConfigCommands};
pub use crypt::{handle_decrypt, handle_encrypt, DecryptArgs, EncryptArgs, KdfChoice};
