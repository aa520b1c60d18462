//! Encrypt and decrypt commands
//!
//! Read from a file or stdin, write to a file or stdout. Text mode (the
//! default) uses the configured text encoding for the ciphertext side;
//! `--binary` reads and writes raw envelope bytes.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tracing::info;

use crate::api::{CipherConfig, PassphraseCipher};
use crate::config::Settings;
use crate::crypto::{Kdf, SecureString, TextEncoding};
use crate::error::{SimpleCryptError, SimpleCryptResult};

/// Key derivation function selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KdfChoice {
    /// PBKDF2-HMAC-SHA256
    Pbkdf2,
    /// Argon2id
    Argon2id,
}

impl KdfChoice {
    /// Pick the KDF, keeping configured costs when the algorithm matches
    fn resolve(self, configured: Kdf) -> Kdf {
        match (self, configured) {
            (Self::Pbkdf2, kdf @ Kdf::Pbkdf2Sha256 { .. }) => kdf,
            (Self::Argon2id, kdf @ Kdf::Argon2id { .. }) => kdf,
            (Self::Pbkdf2, _) => Kdf::pbkdf2(),
            (Self::Argon2id, _) => Kdf::argon2id(),
        }
    }
}

/// Arguments for `encrypt`
#[derive(Debug, Args)]
pub struct EncryptArgs {
    /// Input file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the raw binary envelope instead of encoded text
    #[arg(long)]
    pub binary: bool,

    /// Passphrase (prompted with hidden input when omitted)
    #[arg(short, long)]
    pub passphrase: Option<String>,

    /// Key derivation function
    #[arg(long, value_enum)]
    pub kdf: Option<KdfChoice>,

    /// Text encoding for the output (hex or base64)
    #[arg(short, long)]
    pub encoding: Option<TextEncoding>,
}

/// Arguments for `decrypt`
#[derive(Debug, Args)]
pub struct DecryptArgs {
    /// Input file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read a raw binary envelope instead of encoded text
    #[arg(long)]
    pub binary: bool,

    /// Passphrase (prompted with hidden input when omitted)
    #[arg(short, long)]
    pub passphrase: Option<String>,

    /// Text encoding of the input (hex or base64)
    #[arg(short, long)]
    pub encoding: Option<TextEncoding>,
}

/// Handle `encrypt`
pub fn handle_encrypt(settings: &Settings, args: EncryptArgs) -> SimpleCryptResult<()> {
    let mut config = settings.cipher_config();
    if let Some(choice) = args.kdf {
        config.kdf = choice.resolve(config.kdf);
    }
    if let Some(encoding) = args.encoding {
        config.text_encoding = encoding;
    }

    let passphrase = match args.passphrase {
        Some(p) => SecureString::from(p),
        None => prompt_new_passphrase()?,
    };

    let plaintext = read_input(args.input.as_deref())?;
    let sealed = PassphraseCipher::new(config).encrypt(&plaintext, &passphrase)?;

    info!(
        algorithm = config.kdf.name(),
        input_len = plaintext.len(),
        output_len = sealed.len(),
        "encrypted input"
    );

    if args.binary {
        write_output(args.output.as_deref(), &sealed)
    } else {
        let mut text = config.text_encoding.encode(&sealed);
        text.push('\n');
        write_output(args.output.as_deref(), text.as_bytes())
    }
}

/// Handle `decrypt`
pub fn handle_decrypt(settings: &Settings, args: DecryptArgs) -> SimpleCryptResult<()> {
    let config = CipherConfig {
        text_encoding: args.encoding.unwrap_or(settings.text_encoding),
        ..settings.cipher_config()
    };

    let input = read_input(args.input.as_deref())?;
    let ciphertext = if args.binary {
        input
    } else {
        let text = String::from_utf8(input).map_err(|e| {
            SimpleCryptError::Encoding(format!("Input is not valid text: {}", e))
        })?;
        config.text_encoding.decode(&text)?
    };

    let passphrase = match args.passphrase {
        Some(p) => SecureString::from(p),
        None => prompt_passphrase("Enter passphrase: ")?,
    };

    let plaintext = PassphraseCipher::new(config).decrypt(&ciphertext, &passphrase)?;
    info!(output_len = plaintext.len(), "decrypted input");

    write_output(args.output.as_deref(), &plaintext)
}

fn read_input(path: Option<&Path>) -> SimpleCryptResult<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).map_err(|e| {
            SimpleCryptError::Io(format!("Failed to read {}: {}", path.display(), e))
        }),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| SimpleCryptError::Io(format!("Failed to read stdin: {}", e)))?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> SimpleCryptResult<()> {
    match path {
        Some(path) => std::fs::write(path, bytes).map_err(|e| {
            SimpleCryptError::Io(format!("Failed to write {}: {}", path.display(), e))
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| SimpleCryptError::Io(format!("Failed to write stdout: {}", e)))
        }
    }
}

/// Prompt for a new passphrase with confirmation
fn prompt_new_passphrase() -> SimpleCryptResult<SecureString> {
    loop {
        let pass1 = prompt_passphrase("Enter passphrase: ")?;
        let pass2 = prompt_passphrase("Confirm passphrase: ")?;

        if pass1 != pass2 {
            eprintln!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a passphrase (hidden input)
fn prompt_passphrase(prompt: &str) -> SimpleCryptResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| SimpleCryptError::Io(format!("Failed to read passphrase: {}", e)))
}
