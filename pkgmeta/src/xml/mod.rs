//! Owned, read-only XML element tree.
//!
//! Metadata files are parsed with [`roxmltree`], whose documents borrow the
//! source text. The tree is converted into owned [`XmlElement`] values so a
//! parsed [`PackageMetadata`](crate::metadata::PackageMetadata) can keep the
//! whole document without holding on to the input buffer.
//!
//! # Example
//!
//! ```
//! use pkgmeta::xml::parse_document;
//!
//! let root = parse_document(r#"<package format="3"><name>demo</name></package>"#, "inline")
//!     .unwrap();
//!
//! assert_eq!(root.name(), "package");
//! assert_eq!(root.attribute("format"), Some("3"));
//! assert_eq!(root.find("name").unwrap().text_content(), "demo");
//! ```

use serde::Serialize;

/// Error produced when a document cannot be parsed.
///
/// Carries a human-readable reason; callers wrap it into their own error
/// type together with the document origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlParseError {
    /// Description of the failure from the underlying parser.
    pub reason: String,
}

impl std::fmt::Display for XmlParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for XmlParseError {}

/// Namespace URI bound to the reserved `xml` prefix.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A single attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlAttribute {
    /// Local attribute name (namespace prefix removed).
    pub name: String,
    /// Name as written in the document, `prefix:local` for namespaced
    /// attributes.
    pub qualified_name: String,
    /// Attribute value after entity decoding.
    pub value: String,
}

/// A child node of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum XmlNode {
    /// Nested element.
    Element(XmlElement),
    /// Text (CDATA sections are merged into text by the parser).
    Text(String),
}

/// An element of the retained document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlElement {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Local tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI of the element, if it has one.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up an attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// All child nodes (elements and text) in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements in document order, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Whether this element has at least one child element.
    pub fn has_child_elements(&self) -> bool {
        self.elements().next().is_some()
    }

    /// First direct child element with the given local name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// All direct child elements with the given local name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        let attributes = node
            .attributes()
            .map(|a| XmlAttribute {
                name: a.name().to_string(),
                qualified_name: qualified_attribute_name(node, &a),
                value: a.value().to_string(),
            })
            .collect();

        let children = node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(XmlNode::Element(Self::from_node(child)))
                } else if child.is_text() {
                    child.text().map(|t| XmlNode::Text(t.to_string()))
                } else {
                    // comments and processing instructions
                    None
                }
            })
            .collect();

        Self {
            name: tag.name().to_string(),
            namespace: tag.namespace().map(str::to_string),
            attributes,
            children,
        }
    }
}

/// Rebuild `prefix:local` for an attribute from the prefixes in scope.
fn qualified_attribute_name(
    node: roxmltree::Node<'_, '_>,
    attr: &roxmltree::Attribute<'_, '_>,
) -> String {
    let Some(uri) = attr.namespace() else {
        return attr.name().to_string();
    };
    match node.lookup_prefix(uri) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, attr.name()),
        _ if uri == XML_NAMESPACE => format!("xml:{}", attr.name()),
        _ => attr.name().to_string(),
    }
}

/// Parse a document and return its owned root element.
///
/// Parsing is namespace-aware and does not validate against any DTD or
/// schema. An internal DTD is accepted so that declared entities resolve.
/// `origin` only labels debug output.
pub fn parse_document(text: &str, origin: &str) -> Result<XmlElement, XmlParseError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };

    let doc = roxmltree::Document::parse_with_options(text, options).map_err(|e| {
        tracing::debug!(origin, error = %e, "XML parse failed");
        XmlParseError {
            reason: e.to_string(),
        }
    })?;

    Ok(XmlElement::from_node(doc.root_element()))
}
