//! Discovery of installed themes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use rayon::prelude::*;

use super::source::METADATA_FILE;
use super::Theme;

/// Default file extension of archived themes.
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "theme";

/// Index of the themes found in one directory.
///
/// Call [`rescan`](Self::rescan) to (re)load the directory. Themes that fail
/// to load are logged and skipped. When two themes share a name the one
/// whose path sorts last wins.
///
/// # Example
///
/// ```no_run
/// use pkgmeta::theme::ThemeManager;
///
/// let mut manager = ThemeManager::new("/home/user/.pkgmeta/themes");
/// manager.rescan();
///
/// for name in manager.theme_names() {
///     println!("{}", name);
/// }
/// ```
#[derive(Debug)]
pub struct ThemeManager {
    directory: PathBuf,
    archive_extension: String,
    themes: BTreeMap<String, Theme>,
}

impl ThemeManager {
    /// Create a manager for `directory`. No themes are loaded until
    /// [`rescan`](Self::rescan) is called.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            themes: BTreeMap::new(),
        }
    }

    /// Set the file extension used to recognize archived themes.
    pub fn with_archive_extension(mut self, extension: impl Into<String>) -> Self {
        self.archive_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Rescan the theme directory and replace the loaded themes.
    ///
    /// Candidates are subdirectories holding a `metadata.xml` and files with
    /// the archive extension. They are loaded in parallel. Returns the number
    /// of themes loaded.
    pub fn rescan(&mut self) -> usize {
        let candidates = self.candidates();
        tracing::debug!(
            directory = %self.directory.display(),
            candidates = candidates.len(),
            "Scanning for themes"
        );

        let loaded: Vec<Theme> = candidates
            .par_iter()
            .filter_map(|path| match Theme::load(path) {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping theme");
                    None
                }
            })
            .collect();

        self.themes = loaded
            .into_iter()
            .map(|theme| (theme.name(), theme))
            .collect();

        tracing::info!(
            directory = %self.directory.display(),
            themes = self.themes.len(),
            "Theme scan complete"
        );
        self.themes.len()
    }

    fn candidates(&self) -> Vec<PathBuf> {
        let base = Pattern::escape(&self.directory.to_string_lossy());
        let patterns = [
            format!("{}/*/{}", base, METADATA_FILE),
            format!("{}/*.{}", base, Pattern::escape(&self.archive_extension)),
        ];

        let mut found = Vec::new();
        for pattern in &patterns {
            let entries = match glob::glob(pattern) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "Invalid theme pattern");
                    continue;
                }
            };
            for entry in entries {
                match entry {
                    Ok(path) if path.file_name().is_some_and(|f| f == METADATA_FILE) => {
                        if let Some(dir) = path.parent() {
                            found.push(dir.to_path_buf());
                        }
                    }
                    Ok(path) if path.is_file() => found.push(path),
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "Unreadable theme entry"),
                }
            }
        }

        // sorted so duplicate names resolve the same way on every scan
        found.sort();
        found.dedup();
        found
    }

    /// Names of all loaded themes, alphabetically.
    pub fn theme_names(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }

    /// All loaded themes, ordered by name.
    pub fn themes(&self) -> Vec<&Theme> {
        self.themes.values().collect()
    }

    /// Look up a loaded theme by name.
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dir_theme(root: &Path, folder: &str, name: &str) {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(METADATA_FILE),
            format!(r#"<package format="3"><name>{}</name></package>"#, name),
        )
        .unwrap();
    }

    #[test]
    fn test_empty_before_rescan() {
        let manager = ThemeManager::new("/nonexistent");
        assert!(manager.is_empty());
        assert!(manager.theme_names().is_empty());
    }

    #[test]
    fn test_rescan_missing_directory() {
        let mut manager = ThemeManager::new("/definitely/not/a/theme/dir");
        assert_eq!(manager.rescan(), 0);
    }

    #[test]
    fn test_rescan_sorts_names_and_skips_broken() {
        let temp = tempfile::TempDir::new().unwrap();
        write_dir_theme(temp.path(), "z", "Zebra");
        write_dir_theme(temp.path(), "a", "Aurora");
        write_dir_theme(temp.path(), "m", "Midnight");

        let broken = temp.path().join("broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join(METADATA_FILE), "<package>").unwrap();

        // directory without metadata is not a candidate at all
        fs::create_dir_all(temp.path().join("empty")).unwrap();

        let mut manager = ThemeManager::new(temp.path());
        assert_eq!(manager.rescan(), 3);
        assert_eq!(manager.theme_names(), vec!["Aurora", "Midnight", "Zebra"]);
        assert_eq!(manager.theme("Midnight").unwrap().name(), "Midnight");
        assert!(manager.theme("broken").is_none());
    }

    #[test]
    fn test_rescan_replaces_previous_results() {
        let temp = tempfile::TempDir::new().unwrap();
        write_dir_theme(temp.path(), "one", "One");

        let mut manager = ThemeManager::new(temp.path());
        assert_eq!(manager.rescan(), 1);

        fs::remove_dir_all(temp.path().join("one")).unwrap();
        write_dir_theme(temp.path(), "two", "Two");
        assert_eq!(manager.rescan(), 1);
        assert_eq!(manager.theme_names(), vec!["Two"]);
    }

    #[test]
    fn test_archive_extension_is_normalized() {
        let manager = ThemeManager::new("/x").with_archive_extension(".zip");
        assert_eq!(manager.archive_extension, "zip");
    }

    #[test]
    fn test_broken_archive_is_skipped() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("bad.theme"), b"nope").unwrap();
        write_dir_theme(temp.path(), "good", "Good");

        let mut manager = ThemeManager::new(temp.path());
        assert_eq!(manager.rescan(), 1);
        assert_eq!(manager.themes()[0].name(), "Good");
    }
}
