//! pkgmeta CLI - inspect package descriptions and installed themes.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pkgmeta::config::{config_file_path, ConfigFile};
use pkgmeta::logging::init_logging;

use commands::config::ConfigAction;
use commands::themes::ThemesAction;
use error::CliError;

#[derive(Parser)]
#[command(name = "pkgmeta")]
#[command(version, about = "Inspect package.xml metadata and installed themes", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.pkgmeta/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a parsed package description
    Show {
        /// Path to a package.xml file
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the records of a non-standard tag
    Generic {
        /// Path to a package.xml file
        file: PathBuf,

        /// Tag name, matched exactly
        tag: String,
    },
    /// List dependencies, conflicts and replacements
    Deps {
        /// Path to a package.xml file
        file: PathBuf,

        /// Candidate version to check, repeatable
        #[arg(long = "candidate", value_name = "NAME=VERSION")]
        candidates: Vec<String>,
    },
    /// Check that a package description has all required fields
    Validate {
        /// Path to a package.xml file
        file: PathBuf,
    },
    /// List and inspect installed themes
    Themes {
        #[command(subcommand)]
        action: ThemesAction,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let config = match ConfigFile::load_from(&config_path) {
        Ok(config) => config,
        // still report where the broken file lives
        Err(_) if matches!(cli.command, Commands::Config { action: ConfigAction::Path }) => {
            ConfigFile::default()
        }
        Err(e) => return Err(e.into()),
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let _guard = init_logging(&config.logging.directory, &config.logging.file, level)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;
    tracing::debug!(config = %config_path.display(), "Configuration loaded");

    match cli.command {
        Commands::Show { file, json } => commands::show::run(&file, json),
        Commands::Generic { file, tag } => commands::generic::run(&file, &tag),
        Commands::Deps { file, candidates } => commands::deps::run(&file, &candidates),
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Themes { action } => commands::themes::run(action, &config),
        Commands::Config { action } => commands::config::run(action, &config_path, &config),
    }
}
