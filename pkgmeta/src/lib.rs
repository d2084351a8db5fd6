//! pkgmeta - package metadata parsing and theme loading
//!
//! Parses `package.xml` style package descriptions (schema format 3) into
//! typed, read-only records, and discovers themes that carry such a
//! description as `metadata.xml`.
//!
//! # Example
//!
//! ```
//! use pkgmeta::metadata::PackageMetadata;
//!
//! let xml = r#"<package format="3">
//!   <name>foo</name>
//!   <version>1.2.3</version>
//!   <depend version_gte="1.0">bar</depend>
//! </package>"#;
//!
//! let metadata = PackageMetadata::from_xml_str(xml).unwrap();
//! assert_eq!(metadata.name(), "foo");
//! assert!(metadata.dependencies()[0].matches_dependency("1.5"));
//! ```

pub mod config;
pub mod logging;
pub mod metadata;
pub mod theme;
pub mod xml;
