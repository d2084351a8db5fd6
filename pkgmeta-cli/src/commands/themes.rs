//! Theme CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use pkgmeta::config::ConfigFile;
use pkgmeta::theme::{Theme, ThemeManager};

use super::show::render;
use crate::error::CliError;

/// Theme action subcommands.
#[derive(Debug, Subcommand)]
pub enum ThemesAction {
    /// List installed themes
    List {
        /// Theme directory (defaults to [themes] directory from config)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show the metadata of one theme
    Show {
        /// Theme name as printed by 'themes list'
        #[arg(required_unless_present = "path")]
        name: Option<String>,

        /// Load a theme directory or archive directly instead of by name
        #[arg(long, conflicts_with_all = ["name", "dir"])]
        path: Option<PathBuf>,

        /// Theme directory (defaults to [themes] directory from config)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Run a themes subcommand.
pub fn run(action: ThemesAction, config: &ConfigFile) -> Result<(), CliError> {
    match action {
        ThemesAction::List { dir } => {
            let manager = scan(dir, config);
            if manager.is_empty() {
                println!("No themes found in {}", manager.directory().display());
                return Ok(());
            }
            for theme in manager.themes() {
                let version = theme.metadata().version();
                if version.is_empty() {
                    println!("{}", theme.name());
                } else {
                    println!("{} {}", theme.name(), version);
                }
            }
            Ok(())
        }
        ThemesAction::Show { path: Some(path), .. } => {
            let theme = Theme::load(&path)?;
            print_theme(&theme);
            Ok(())
        }
        ThemesAction::Show { name, dir, .. } => {
            let name = name.unwrap_or_default();
            let manager = scan(dir, config);
            let theme = manager
                .theme(&name)
                .ok_or_else(|| CliError::ThemeNotFound {
                    name: name.clone(),
                    directory: manager.directory().display().to_string(),
                })?;
            print_theme(theme);
            Ok(())
        }
    }
}

fn print_theme(theme: &Theme) {
    println!("Path:        {}", theme.path().display());
    println!("Source:      {:?}", theme.source_kind());
    print!("{}", render(theme.metadata()));
}

fn scan(dir: Option<PathBuf>, config: &ConfigFile) -> ThemeManager {
    let directory = dir.unwrap_or_else(|| config.themes.directory.clone());
    let mut manager = ThemeManager::new(directory)
        .with_archive_extension(config.themes.archive_extension.clone());
    manager.rescan();
    manager
}
