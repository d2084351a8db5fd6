//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::defaults::VALID_LOG_LEVELS;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[themes]
; Directory scanned for themes. Each theme is either a folder holding
; metadata.xml or a zip archive with the extension below.
directory = {}
; File extension of zipped themes (without the dot)
archive_extension = {}

[logging]
; Directory for the log file
directory = {}
; Log file name (cleared at the start of each run)
file = {}
; Default level when RUST_LOG is not set: {}
level = {}
"#,
        path_to_string(&config.themes.directory),
        config.themes.archive_extension,
        path_to_string(&config.logging.directory),
        config.logging.file,
        VALID_LOG_LEVELS.join(", "),
        config.logging.level,
    )
}

/// Render a path, abbreviating the home directory as `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
