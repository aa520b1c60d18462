//! Cipher settings
//!
//! JSON-backed defaults for the key derivation function and text encoding.
//! Every field has a default, so `{}` is a valid settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::CipherConfig;
use crate::crypto::{Kdf, TextEncoding};
use crate::error::{SimpleCryptError, SimpleCryptResult};

/// User settings for simplecrypt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Key derivation function used for new ciphertexts
    #[serde(default)]
    pub kdf: Kdf,

    /// Encoding for text-typed input and output
    #[serde(default)]
    pub text_encoding: TextEncoding,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            kdf: Kdf::default(),
            text_encoding: TextEncoding::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> SimpleCryptResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SimpleCryptError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            SimpleCryptError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> SimpleCryptResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SimpleCryptError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SimpleCryptError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(path, contents).map_err(|e| {
            SimpleCryptError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check that the settings can be used for encryption
    pub fn validate(&self) -> SimpleCryptResult<()> {
        if self.schema_version != default_schema_version() {
            return Err(SimpleCryptError::Config(format!(
                "Unsupported settings schema version: {}",
                self.schema_version
            )));
        }

        self.kdf
            .validate()
            .map_err(|e| SimpleCryptError::Config(e.to_string()))
    }

    /// Build the cipher configuration these settings describe
    pub fn cipher_config(&self) -> CipherConfig {
        CipherConfig {
            kdf: self.kdf,
            text_encoding: self.text_encoding,
        }
    }
}
