//! Error types for theme loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::metadata::MetadataError;

/// Result type for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

/// Errors that can occur while loading a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The theme path does not exist.
    #[error("cannot access theme at {}", .0.display())]
    NotFound(PathBuf),

    /// The theme has no `metadata.xml`.
    #[error("cannot find {} in theme {}", .file, .theme.display())]
    MissingMetadata { theme: PathBuf, file: String },

    /// The theme file is not a readable zip archive.
    #[error("failed to read theme archive {}: {reason}", .path.display())]
    Archive { path: PathBuf, reason: String },

    /// The theme metadata could not be parsed.
    #[error("invalid theme metadata: {0}")]
    Metadata(#[from] MetadataError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::SchemaError;

    #[test]
    fn test_error_display() {
        let err = ThemeError::MissingMetadata {
            theme: PathBuf::from("/themes/dark"),
            file: "metadata.xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot find metadata.xml in theme /themes/dark"
        );
    }

    #[test]
    fn test_from_metadata_error() {
        let err: ThemeError = MetadataError::from(SchemaError::MissingFormat).into();
        assert!(matches!(err, ThemeError::Metadata(_)));
    }
}
