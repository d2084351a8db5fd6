//! Error types for metadata parsing.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that abort construction of a [`PackageMetadata`](super::PackageMetadata).
///
/// These are structural failures. Content anomalies such as missing optional
/// tags or unknown attribute values are normalized and never reported here.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input is not well-formed XML.
    #[error("malformed XML in {origin}: {reason}")]
    MalformedXml { origin: String, reason: String },

    /// The document is well-formed but not a supported package description.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Required fields are absent. Only returned by
    /// [`PackageMetadata::validate`](super::PackageMetadata::validate).
    #[error("missing required metadata: {}", join_fields(.0))]
    MissingRequired(Vec<RequiredField>),
}

/// Hard failures on the document root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Root element is not `<package>`.
    #[error("root element must be <package>, found <{found}>")]
    UnexpectedRoot { found: String },

    /// The `format` attribute is missing or empty.
    #[error("<package> must carry a 'format' attribute")]
    MissingFormat,

    /// The `format` attribute is not an integer.
    #[error("format attribute '{value}' is not an integer")]
    InvalidFormat { value: String },

    /// The format version is not supported.
    #[error("package format version {version} is not supported")]
    UnsupportedFormat { version: i64 },
}

/// Required metadata fields checked by `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Name,
    Version,
    Description,
    Maintainer,
    License,
}

impl RequiredField {
    /// Tag name of the field in the metadata file.
    pub fn tag(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Version => "version",
            RequiredField::Description => "description",
            RequiredField::Maintainer => "maintainer",
            RequiredField::License => "license",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.tag())
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
