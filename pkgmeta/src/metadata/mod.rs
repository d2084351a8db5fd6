//! Package metadata parsing.
//!
//! Reads `package.xml` style descriptions (schema format 3) into typed
//! records. The format follows ROS REP 149:
//!
//! ```text
//! <package format="3">
//!   <name>           required, last occurrence wins
//!   <version>        required, last occurrence wins
//!   <description>    required, last occurrence wins
//!   <maintainer>     1+, optional "email"
//!   <license>        1+, optional "file"
//!   <url>            0+, optional "type": website (default), bugtracker, repository
//!   <author>         0+, optional "email"
//!   <depend>         0+, optional version_lt/lte/eq/gte/gt and condition
//!   <conflict>       0+, as depend
//!   <replace>        0+, as depend
//!   <anything-else>  leaf elements become GenericMetadata
//! </package>
//! ```
//!
//! Only the root element and its `format` attribute can make parsing fail.
//! Everything else is normalized: missing attributes are empty, unknown URL
//! types are websites, and nested unknown elements are left in the retained
//! document tree.

mod condition;
mod dependency;
mod error;
mod package;
mod tag;
mod types;
mod version;

pub use condition::{
    ConditionError, ConditionEvaluator, Rep149Evaluator, MAX_NESTING, VERSION_VARIABLE,
};
pub use dependency::Dependency;
pub use error::{MetadataError, MetadataResult, RequiredField, SchemaError};
pub use package::{PackageMetadata, FORMAT_ATTRIBUTE, ROOT_TAG, SUPPORTED_FORMAT};
pub use tag::TagKind;
pub use types::{Contact, GenericMetadata, License, Url, UrlType};
pub use version::{InvalidTriplet, VersionTriplet};
