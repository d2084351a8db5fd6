//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::VALID_LOG_LEVELS;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [themes] section
    if let Some(section) = ini.section(Some("themes")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.themes.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("archive_extension") {
            let ext = v.trim().trim_start_matches('.');
            let valid = !ext.is_empty()
                && ext
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                return Err(ConfigFileError::InvalidValue {
                    section: "themes".to_string(),
                    key: "archive_extension".to_string(),
                    value: v.to_string(),
                    reason: "expected a file extension like 'theme' or 'zip'".to_string(),
                });
            }
            config.themes.archive_extension = ext.to_string();
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if v.contains('/') || v.contains('\\') {
                return Err(ConfigFileError::InvalidValue {
                    section: "logging".to_string(),
                    key: "file".to_string(),
                    value: v.to_string(),
                    reason: "must be a file name, set the directory separately".to_string(),
                });
            }
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
        if let Some(v) = section.get("level") {
            let level = v.trim().to_lowercase();
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigFileError::InvalidValue {
                    section: "logging".to_string(),
                    key: "level".to_string(),
                    value: v.to_string(),
                    reason: format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
                });
            }
            config.logging.level = level;
        }
    }

    Ok(config)
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
