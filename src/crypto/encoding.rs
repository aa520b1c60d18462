//! Text encoding of ciphertext bytes
//!
//! Used by the string-typed API to turn binary envelopes into printable
//! text and back.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{SimpleCryptError, SimpleCryptResult};

/// Reversible byte-to-text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Lowercase hexadecimal (default)
    #[default]
    Hex,
    /// Standard padded Base64
    Base64,
}

impl TextEncoding {
    /// Encode bytes as text
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
        }
    }

    /// Decode text back into bytes
    ///
    /// Surrounding whitespace is ignored. Hex input may use either case.
    pub fn decode(&self, text: &str) -> SimpleCryptResult<Vec<u8>> {
        let text = text.trim();
        match self {
            Self::Hex => hex::decode(text)
                .map_err(|e| SimpleCryptError::Encoding(format!("Invalid hex encoding: {}", e))),
            Self::Base64 => STANDARD
                .decode(text)
                .map_err(|e| SimpleCryptError::Encoding(format!("Invalid base64 encoding: {}", e))),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = SimpleCryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" | "b64" => Ok(Self::Base64),
            other => Err(SimpleCryptError::Encoding(format!(
                "Unknown text encoding '{}': expected hex or base64",
                other
            ))),
        }
    }
}
