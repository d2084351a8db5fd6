//! Configuration CLI commands.

use std::path::Path;

use clap::Subcommand;
use pkgmeta::config::ConfigFile;

use crate::error::CliError;

/// Config action subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the path of the config file
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(action: ConfigAction, path: &Path, config: &ConfigFile) -> Result<(), CliError> {
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            println!("[themes]");
            println!("directory = {}", config.themes.directory.display());
            println!("archive_extension = {}", config.themes.archive_extension);
            println!();
            println!("[logging]");
            println!("directory = {}", config.logging.directory.display());
            println!("file = {}", config.logging.file);
            println!("level = {}", config.logging.level);
            Ok(())
        }
        ConfigAction::Init => {
            if ConfigFile::ensure_exists_at(path)? {
                println!("Created {}", path.display());
            } else {
                println!("Config already exists at {}", path.display());
            }
            Ok(())
        }
    }
}
