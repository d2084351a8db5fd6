//! Reading theme metadata from directories and zip archives.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use zip::ZipArchive;

use super::error::{ThemeError, ThemeResult};
use crate::metadata::{MetadataError, PackageMetadata};

/// Name of the metadata file at the root of a theme.
pub const METADATA_FILE: &str = "metadata.xml";

/// Where a theme was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSourceKind {
    /// An unpacked theme directory.
    Directory,
    /// A zip archive of a theme directory.
    Archive,
}

impl ThemeSourceKind {
    /// Classify an existing path.
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            ThemeSourceKind::Directory
        } else {
            ThemeSourceKind::Archive
        }
    }
}

/// Parse `<dir>/metadata.xml`.
pub(crate) fn read_directory(dir: &Path) -> ThemeResult<PackageMetadata> {
    let file = dir.join(METADATA_FILE);
    if !file.is_file() {
        return Err(ThemeError::MissingMetadata {
            theme: dir.to_path_buf(),
            file: METADATA_FILE.to_string(),
        });
    }
    Ok(PackageMetadata::from_file(&file)?)
}

/// Parse `metadata.xml` from a zip archive.
///
/// The file is taken from the archive root, or from a single top-level
/// folder when the archive wraps the theme directory.
pub(crate) fn read_archive(path: &Path) -> ThemeResult<PackageMetadata> {
    let archive_error = |reason: String| ThemeError::Archive {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| archive_error(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| archive_error(e.to_string()))?;

    let entry_name = find_metadata_entry(archive.file_names()).ok_or_else(|| {
        ThemeError::MissingMetadata {
            theme: path.to_path_buf(),
            file: METADATA_FILE.to_string(),
        }
    })?;
    tracing::debug!(archive = %path.display(), entry = %entry_name, "Reading theme metadata");

    let mut entry = archive
        .by_name(&entry_name)
        .map_err(|e| archive_error(e.to_string()))?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| archive_error(e.to_string()))?;

    let origin = format!("{}!{}", path.display(), entry_name);
    let text = String::from_utf8(bytes).map_err(|e| MetadataError::MalformedXml {
        origin: origin.clone(),
        reason: format!("invalid UTF-8: {}", e),
    })?;

    Ok(PackageMetadata::parse(&text, &origin)?)
}

/// Pick the archive entry holding the theme metadata.
fn find_metadata_entry<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut nested = None;
    for name in names {
        if name == METADATA_FILE {
            return Some(name.to_string());
        }
        if nested.is_none() {
            if let Some((folder, file)) = name.split_once('/') {
                if !folder.is_empty() && file == METADATA_FILE {
                    nested = Some(name.to_string());
                }
            }
        }
    }
    nested
}
