//! Default values and the `ConfigFile::default()` implementation.

use super::settings::*;

/// Default extension of zipped themes.
pub const DEFAULT_ARCHIVE_EXTENSION: &str = crate::theme::DEFAULT_ARCHIVE_EXTENSION;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "pkgmeta.log";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            themes: ThemeSettings {
                directory: config_dir.join("themes"),
                archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            },
            logging: LoggingSettings {
                directory: config_dir.join("logs"),
                file: DEFAULT_LOG_FILE.to_string(),
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}
