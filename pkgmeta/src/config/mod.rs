//! User configuration stored in `~/.pkgmeta/config.ini`.
//!
//! ```ini
//! [themes]
//! directory = ~/.pkgmeta/themes
//! archive_extension = theme
//!
//! [logging]
//! directory = ~/.pkgmeta/logs
//! file = pkgmeta.log
//! level = info
//! ```
//!
//! A missing file yields the defaults. Unknown keys are ignored.

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_ARCHIVE_EXTENSION, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL, VALID_LOG_LEVELS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, ThemeSettings};
