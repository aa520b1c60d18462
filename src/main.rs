use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use simplecrypt::cli::{
    handle_config_command, handle_decrypt, handle_encrypt, ConfigCommands, DecryptArgs,
    EncryptArgs,
};
use simplecrypt::config::Settings;

#[derive(Parser)]
#[command(
    name = "simplecrypt",
    version,
    about = "Encrypt and decrypt data with a passphrase",
    long_about = "simplecrypt encrypts data with AES-256-GCM under a key derived from a \
                  passphrase (PBKDF2-HMAC-SHA256 or Argon2id). Ciphertext is written as \
                  hex or base64 text by default, or as raw bytes with --binary."
)]
struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt data
    #[command(alias = "enc")]
    Encrypt(EncryptArgs),

    /// Decrypt data
    #[command(alias = "dec")]
    Decrypt(DecryptArgs),

    /// Settings management
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Encrypt(args) => handle_encrypt(&settings, args).context("Encryption failed")?,
        Commands::Decrypt(args) => handle_decrypt(&settings, args).context("Decryption failed")?,
        Commands::Config(cmd) => handle_config_command(&settings, cmd)?,
    }

    Ok(())
}
