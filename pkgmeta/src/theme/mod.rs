//! Themes: metadata-bearing directories or zip archives.
//!
//! A theme is a collection of user preferences distributed either as a plain
//! directory or as a zip archive of that directory. Both carry a
//! `metadata.xml` package description at their root, which is parsed with
//! [`PackageMetadata`].
//!
//! ```text
//! themes/
//! ├── dark/                 Directory theme
//! │   └── metadata.xml
//! └── solarized.theme       Archive theme (zip)
//!     └── metadata.xml      (or solarized/metadata.xml)
//! ```
//!
//! Only discovery and metadata loading are provided here. Applying or saving
//! preference sets is left to the application.

mod error;
mod manager;
mod source;

pub use error::{ThemeError, ThemeResult};
pub use manager::{ThemeManager, DEFAULT_ARCHIVE_EXTENSION};
pub use source::{ThemeSourceKind, METADATA_FILE};

use std::path::{Path, PathBuf};

use crate::metadata::PackageMetadata;

/// A theme loaded from disk.
#[derive(Debug, Clone)]
pub struct Theme {
    path: PathBuf,
    kind: ThemeSourceKind,
    metadata: PackageMetadata,
}

impl Theme {
    /// Load a theme from a directory or a zip archive.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::NotFound`] if `path` does not exist
    /// - [`ThemeError::MissingMetadata`] if there is no `metadata.xml`
    /// - [`ThemeError::Archive`] if a file is not a readable zip archive
    /// - [`ThemeError::Metadata`] if `metadata.xml` fails to parse
    pub fn load(path: impl AsRef<Path>) -> ThemeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::NotFound(path.to_path_buf()));
        }

        let kind = ThemeSourceKind::detect(path);
        let metadata = match kind {
            ThemeSourceKind::Directory => source::read_directory(path)?,
            ThemeSourceKind::Archive => source::read_archive(path)?,
        };

        tracing::debug!(
            path = %path.display(),
            kind = ?kind,
            name = %metadata.name(),
            "Loaded theme"
        );

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            metadata,
        })
    }

    /// Theme name from its metadata.
    ///
    /// Falls back to the file stem of the theme path when the metadata has
    /// no name.
    pub fn name(&self) -> String {
        if !self.metadata.name().is_empty() {
            return self.metadata.name().to_string();
        }
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_kind(&self) -> ThemeSourceKind {
        self.kind
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }
}
