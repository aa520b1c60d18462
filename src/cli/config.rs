//! Configuration CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{SimpleCryptError, SimpleCryptResult};

/// Configuration commands
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings as JSON
    Show,

    /// Write a settings file with default values
    Init {
        /// Where to write the settings file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Handle configuration commands
pub fn handle_config_command(settings: &Settings, cmd: ConfigCommands) -> SimpleCryptResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(settings).map_err(|e| {
                SimpleCryptError::Config(format!("Failed to serialize settings: {}", e))
            })?;
            println!("{}", json);
            Ok(())
        }
        ConfigCommands::Init { path, force } => {
            if path.exists() && !force {
                return Err(SimpleCryptError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            Settings::default().save(&path)?;
            println!("Wrote default settings to {}", path.display());
            Ok(())
        }
    }
}
