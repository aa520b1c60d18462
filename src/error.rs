//! Custom error types for simplecrypt
//!
//! Every fallible operation returns a [`SimpleCryptResult`]. Cryptographic
//! failures are always surfaced to the caller; nothing is swallowed into an
//! empty or placeholder result.

use thiserror::Error;

/// The main error type for simplecrypt operations
#[derive(Error, Debug)]
pub enum SimpleCryptError {
    /// A cryptographic primitive, envelope version or KDF is not supported
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key material does not match what the cipher expects
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The cipher transform failed (authentication failure, truncated data)
    #[error("Cipher transform failed: {0}")]
    Transform(String),

    /// Conversion between text and bytes failed
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Key derivation parameters were rejected or the KDF failed
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl SimpleCryptError {
    /// Check if this error came from the cipher itself rather than from
    /// key derivation, encoding or configuration
    pub fn is_cipher_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAlgorithm(_) | Self::InvalidKey(_) | Self::Transform(_)
        )
    }

    /// Check if this is an encoding error
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }
}

impl From<std::io::Error> for SimpleCryptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SimpleCryptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for simplecrypt operations
pub type SimpleCryptResult<T> = Result<T, SimpleCryptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimpleCryptError::Transform("authentication failed".into());
        assert_eq!(
            err.to_string(),
            "Cipher transform failed: authentication failed"
        );
    }

    #[test]
    fn test_cipher_error_family() {
        assert!(SimpleCryptError::Transform("x".into()).is_cipher_error());
        assert!(SimpleCryptError::InvalidKey("x".into()).is_cipher_error());
        assert!(SimpleCryptError::UnsupportedAlgorithm("x".into()).is_cipher_error());
        assert!(!SimpleCryptError::Encoding("x".into()).is_cipher_error());
        assert!(!SimpleCryptError::KeyDerivation("x".into()).is_cipher_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SimpleCryptError = io_err.into();
        assert!(matches!(err, SimpleCryptError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SimpleCryptError = json_err.into();
        assert!(matches!(err, SimpleCryptError::Config(_)));
    }
}
