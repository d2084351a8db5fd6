//! Settings structs, one per `[section]` of the config file.

use std::path::PathBuf;

/// Complete configuration loaded from `config.ini`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Theme discovery settings
    pub themes: ThemeSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Theme discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSettings {
    /// Directory scanned for themes
    pub directory: PathBuf,
    /// File extension of zipped themes, without the leading dot
    pub archive_extension: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Directory holding the log file
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
    /// Default filter level when `RUST_LOG` is not set
    pub level: String,
}
