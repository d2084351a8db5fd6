//! The [`PackageMetadata`] record and its parser.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use super::dependency::Dependency;
use super::error::{MetadataError, MetadataResult, RequiredField, SchemaError};
use super::tag::TagKind;
use super::types::{Contact, GenericMetadata, License, Url};
use crate::xml::{parse_document, XmlElement};

/// Tag of the document root.
pub const ROOT_TAG: &str = "package";

/// Root attribute carrying the schema version.
pub const FORMAT_ATTRIBUTE: &str = "format";

/// The only schema version this parser understands.
pub const SUPPORTED_FORMAT: i64 = 3;

/// Metadata read from a package description file.
///
/// Construction walks the direct children of `<package>` once, in document
/// order, and either succeeds completely or returns an error. The parsed
/// document is owned by the value so unrecognized multi-level metadata stays
/// reachable through [`root`](Self::root).
///
/// # Example
///
/// ```
/// use pkgmeta::metadata::{PackageMetadata, UrlType};
///
/// let xml = r#"
/// <package format="3">
///   <name>Sheet Metal</name>
///   <version>0.2.49</version>
///   <description>Sheet metal design tools</description>
///   <maintainer email="jane@example.org">Jane</maintainer>
///   <license file="LICENSE">LGPL-2.1</license>
///   <url type="repository">https://example.org/sheetmetal.git</url>
///   <icon>Resources/icon.svg</icon>
/// </package>"#;
///
/// let meta: PackageMetadata = xml.parse().unwrap();
///
/// assert_eq!(meta.name(), "Sheet Metal");
/// assert_eq!(meta.maintainers()[0].email, "jane@example.org");
/// assert_eq!(meta.urls()[0].url_type, UrlType::Repository);
/// assert_eq!(meta.generic("icon")[0].contents, "Resources/icon.svg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    format: i64,
    name: String,
    version: String,
    description: String,
    maintainers: Vec<Contact>,
    licenses: Vec<License>,
    urls: Vec<Url>,
    authors: Vec<Contact>,
    dependencies: Vec<Dependency>,
    conflicts: Vec<Dependency>,
    replacements: Vec<Dependency>,
    generic: Vec<GenericMetadata>,
    #[serde(skip)]
    root: XmlElement,
}

impl PackageMetadata {
    /// Read and parse a metadata file.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::Io`] if the file cannot be read
    /// - [`MetadataError::MalformedXml`] if it is not well-formed UTF-8 XML
    /// - [`MetadataError::Schema`] if the root or its format version is wrong
    pub fn from_file(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading package metadata");

        let bytes = fs::read(path).map_err(|e| MetadataError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let origin = path.display().to_string();
        let text = String::from_utf8(bytes).map_err(|e| MetadataError::MalformedXml {
            origin: origin.clone(),
            reason: format!("invalid UTF-8: {}", e),
        })?;

        Self::parse(&text, &origin)
    }

    /// Parse metadata from an in-memory document.
    pub fn from_xml_str(text: &str) -> MetadataResult<Self> {
        Self::parse(text, "<memory>")
    }

    /// Parse a document, labelling errors with `origin`.
    pub fn parse(text: &str, origin: &str) -> MetadataResult<Self> {
        let root = parse_document(text, origin).map_err(|e| MetadataError::MalformedXml {
            origin: origin.to_string(),
            reason: e.reason,
        })?;

        let format = check_root(&root)?;
        let metadata = Self::from_root(format, root);

        tracing::debug!(
            origin,
            name = %metadata.name,
            version = %metadata.version,
            dependencies = metadata.dependencies.len(),
            generic = metadata.generic.len(),
            "Parsed package metadata"
        );

        Ok(metadata)
    }

    fn from_root(format: i64, root: XmlElement) -> Self {
        let mut metadata = Self {
            format,
            name: String::new(),
            version: String::new(),
            description: String::new(),
            maintainers: Vec::new(),
            licenses: Vec::new(),
            urls: Vec::new(),
            authors: Vec::new(),
            dependencies: Vec::new(),
            conflicts: Vec::new(),
            replacements: Vec::new(),
            generic: Vec::new(),
            root: XmlElement::default(),
        };

        for element in root.elements() {
            match TagKind::from_tag(element.name()) {
                Some(TagKind::Name) => metadata.name = element.text_content().trim().to_string(),
                Some(TagKind::Version) => {
                    metadata.version = element.text_content().trim().to_string()
                }
                Some(TagKind::Description) => {
                    metadata.description = element.text_content().trim().to_string()
                }
                Some(TagKind::Maintainer) => {
                    metadata.maintainers.push(Contact::from_element(element))
                }
                Some(TagKind::License) => metadata.licenses.push(License::from_element(element)),
                Some(TagKind::Url) => metadata.urls.push(Url::from_element(element)),
                Some(TagKind::Author) => metadata.authors.push(Contact::from_element(element)),
                Some(TagKind::Depend) => {
                    metadata.dependencies.push(Dependency::from_element(element))
                }
                Some(TagKind::Conflict) => {
                    metadata.conflicts.push(Dependency::from_element(element))
                }
                Some(TagKind::Replace) => {
                    metadata.replacements.push(Dependency::from_element(element))
                }
                None if !element.has_child_elements() => {
                    metadata.generic.push(GenericMetadata::from_element(element))
                }
                None => {
                    tracing::trace!(tag = element.name(), "Leaving nested element in tree only");
                }
            }
        }

        metadata.root = root;
        metadata
    }

    /// Schema version the document declared.
    pub fn format(&self) -> i64 {
        self.format
    }

    /// Short package name, often used as a menu entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable version string, typically a triplet such as `1.2.3`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Plain-text description of the package.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn maintainers(&self) -> &[Contact] {
        &self.maintainers
    }

    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn authors(&self) -> &[Contact] {
        &self.authors
    }

    /// Packages required before this one can be used.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Packages this one conflicts with.
    pub fn conflicts(&self) -> &[Dependency] {
        &self.conflicts
    }

    /// Packages this one is intended to replace.
    pub fn replacements(&self) -> &[Dependency] {
        &self.replacements
    }

    /// Generic records parsed from leaf elements named `tag`.
    ///
    /// The lookup is exact and case-sensitive. Returns an empty list when no
    /// such tag was present.
    pub fn generic(&self, tag: &str) -> Vec<GenericMetadata> {
        self.generic
            .iter()
            .filter(|g| g.tag == tag)
            .cloned()
            .collect()
    }

    /// All generic records in document order.
    pub fn generic_entries(&self) -> &[GenericMetadata] {
        &self.generic
    }

    /// The retained `<package>` element, for metadata without a typed field.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Required fields that are absent or empty.
    ///
    /// Parsing never enforces these; callers that need a complete
    /// description use [`validate`](Self::validate).
    pub fn missing_required(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.version.is_empty() {
            missing.push(RequiredField::Version);
        }
        if self.description.is_empty() {
            missing.push(RequiredField::Description);
        }
        if self.maintainers.is_empty() {
            missing.push(RequiredField::Maintainer);
        }
        if self.licenses.is_empty() {
            missing.push(RequiredField::License);
        }
        missing
    }

    /// Fail with [`MetadataError::MissingRequired`] if any required field is
    /// absent.
    pub fn validate(&self) -> MetadataResult<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MetadataError::MissingRequired(missing))
        }
    }
}

impl FromStr for PackageMetadata {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_xml_str(s)
    }
}

/// Check the root tag and format version, returning the version.
fn check_root(root: &XmlElement) -> Result<i64, SchemaError> {
    if root.name() != ROOT_TAG {
        return Err(SchemaError::UnexpectedRoot {
            found: root.name().to_string(),
        });
    }

    let raw = root.attribute(FORMAT_ATTRIBUTE).unwrap_or_default();
    if raw.is_empty() {
        return Err(SchemaError::MissingFormat);
    }

    let version: i64 = raw.trim().parse().map_err(|_| SchemaError::InvalidFormat {
        value: raw.to_string(),
    })?;

    if version != SUPPORTED_FORMAT {
        return Err(SchemaError::UnsupportedFormat { version });
    }

    Ok(version)
}
