//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::process;

use pkgmeta::config::ConfigFileError;
use pkgmeta::metadata::MetadataError;
use pkgmeta::theme::ThemeError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(ConfigFileError),
    /// Failed to parse a metadata file
    Metadata { path: String, error: MetadataError },
    /// Failed to load a theme
    Theme(ThemeError),
    /// Requested theme is not installed
    ThemeNotFound { name: String, directory: String },
    /// Malformed command-line argument
    InvalidArgument(String),
    /// Candidate versions do not satisfy the declared constraints
    Unsatisfied(usize),
    /// Failed to serialize output
    Output(serde_json::Error),
}

impl CliError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => 2,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Metadata {
                error: MetadataError::MissingRequired(_),
                ..
            } => {
                eprintln!();
                eprintln!("A complete package description needs <name>, <version>,");
                eprintln!("<description>, at least one <maintainer> and one <license>.");
            }
            CliError::ThemeNotFound { .. } => {
                eprintln!();
                eprintln!("Run 'pkgmeta themes list' to see installed themes.");
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Metadata { path, error } => write!(f, "{}: {}", path, error),
            CliError::Theme(e) => write!(f, "Theme error: {}", e),
            CliError::ThemeNotFound { name, directory } => {
                write!(f, "No theme named '{}' in {}", name, directory)
            }
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Unsatisfied(count) => {
                write!(f, "{} constraint(s) not satisfied by the candidates", count)
            }
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Metadata { error, .. } => Some(error),
            CliError::Theme(e) => Some(e),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<ThemeError> for CliError {
    fn from(e: ThemeError) -> Self {
        CliError::Theme(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
