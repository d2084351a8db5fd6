//! Typed records built from the direct children of `<package>`.
//!
//! Every record is constructed from one [`XmlElement`] and never fails:
//! absent attributes become empty strings or `None`.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::xml::XmlElement;

/// Attribute value, or the empty string when the attribute is absent.
pub(crate) fn attr_or_empty(element: &XmlElement, name: &str) -> String {
    element.attribute(name).unwrap_or_default().to_string()
}

/// Attribute value, or `None` when absent or empty.
pub(crate) fn attr_non_empty(element: &XmlElement, name: &str) -> Option<String> {
    element
        .attribute(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A point of contact for the package (maintainer or author).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Contact name, from the element text.
    pub name: String,
    /// Email address, empty when the `email` attribute is absent.
    pub email: String,
}

impl Contact {
    pub fn from_element(element: &XmlElement) -> Self {
        Self {
            name: element.text_content(),
            email: attr_or_empty(element, "email"),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

/// A license covering some or all of the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    /// Short license name, e.g. "LGPL-2.1" or "MIT".
    pub name: String,
    /// Path to the full license text, relative to the metadata file.
    pub file: Option<PathBuf>,
}

impl License {
    pub fn from_element(element: &XmlElement) -> Self {
        Self {
            name: element.text_content(),
            file: attr_non_empty(element, "file").map(PathBuf::from),
        }
    }
}

/// Kind of URL listed in the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlType {
    #[default]
    Website,
    Repository,
    Bugtracker,
}

impl UrlType {
    /// Map the `type` attribute to a URL kind.
    ///
    /// Matching is case-sensitive. Empty and unknown values fall back to
    /// [`UrlType::Website`].
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "bugtracker" => UrlType::Bugtracker,
            "repository" => UrlType::Repository,
            _ => UrlType::Website,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlType::Website => "website",
            UrlType::Repository => "repository",
            UrlType::Bugtracker => "bugtracker",
        }
    }
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A URL, including its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Url {
    /// The URL itself, including protocol.
    pub location: String,
    /// What the URL points at.
    #[serde(rename = "type")]
    pub url_type: UrlType,
}

impl Url {
    pub fn from_element(element: &XmlElement) -> Self {
        Self {
            location: element.text_content(),
            url_type: UrlType::from_attribute(element.attribute("type").unwrap_or_default()),
        }
    }
}

/// Unrecognized single-level metadata.
///
/// Leaf elements with an unknown tag are kept as their text plus the full
/// attribute set, so client code can read custom metadata without walking
/// the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericMetadata {
    /// Tag the record was parsed from.
    pub tag: String,
    /// Text content of the element.
    pub contents: String,
    /// Attributes of the element.
    pub attributes: HashMap<String, String>,
}

impl GenericMetadata {
    pub fn from_element(element: &XmlElement) -> Self {
        Self {
            tag: element.name().to_string(),
            contents: element.text_content(),
            attributes: element
                .attributes()
                .iter()
                .map(|a| (a.qualified_name.clone(), a.value.clone()))
                .collect(),
        }
    }

    /// Look up one attribute of the record.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
