//! Dependency, conflict and replacement records.

use std::fmt;

use serde::Serialize;

use super::condition::{ConditionEvaluator, Rep149Evaluator};
use super::types::attr_non_empty;
use super::version::VersionTriplet;
use crate::xml::XmlElement;

/// Another package this package depends on, conflicts with, or replaces.
///
/// All constraints are optional. An attribute that is absent or empty in the
/// metadata file is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Dependency {
    /// Name of the referenced package, matching its `<name>` element.
    pub package: String,
    /// Only versions strictly below this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_lt: Option<String>,
    /// Only versions up to and including this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_lte: Option<String>,
    /// Exactly this version string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_eq: Option<String>,
    /// Only versions from this one upwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_gte: Option<String>,
    /// Only versions strictly above this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_gt: Option<String>,
    /// Conditional expression evaluated with `$VERSION` bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Dependency {
    /// Create an unconstrained dependency on `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn from_element(element: &XmlElement) -> Self {
        Self {
            package: element.text_content(),
            version_lt: attr_non_empty(element, "version_lt"),
            version_lte: attr_non_empty(element, "version_lte"),
            version_eq: attr_non_empty(element, "version_eq"),
            version_gte: attr_non_empty(element, "version_gte"),
            version_gt: attr_non_empty(element, "version_gt"),
            condition: attr_non_empty(element, "condition"),
        }
    }

    /// Whether any version or condition constraint is present.
    pub fn is_constrained(&self) -> bool {
        self.version_eq.is_some() || self.condition.is_some() || self.has_range()
    }

    fn has_range(&self) -> bool {
        self.version_lt.is_some()
            || self.version_lte.is_some()
            || self.version_gte.is_some()
            || self.version_gt.is_some()
    }

    /// Check a candidate version against this dependency.
    ///
    /// `version_eq` is an exact string match and bypasses the range bounds.
    /// Otherwise every range bound that is set must hold under numeric
    /// triplet comparison. A `condition` is evaluated with the built-in
    /// [`Rep149Evaluator`]. A dependency without constraints matches any
    /// version.
    ///
    /// Never fails: malformed versions, malformed bounds and condition errors
    /// all count as "does not match".
    ///
    /// # Example
    ///
    /// ```
    /// use pkgmeta::metadata::Dependency;
    ///
    /// let mut dep = Dependency::new("Part");
    /// dep.version_gte = Some("1.0.0".to_string());
    /// dep.version_lt = Some("2.0.0".to_string());
    ///
    /// assert!(dep.matches_dependency("1.5.0"));
    /// assert!(!dep.matches_dependency("2.0.0"));
    /// assert!(!dep.matches_dependency("not a version"));
    /// ```
    pub fn matches_dependency(&self, version: &str) -> bool {
        self.matches_with(version, &Rep149Evaluator::new())
    }

    /// Like [`matches_dependency`](Self::matches_dependency) with a caller
    /// supplied condition evaluator.
    pub fn matches_with(&self, version: &str, evaluator: &dyn ConditionEvaluator) -> bool {
        if let Some(eq) = &self.version_eq {
            if version != eq {
                return false;
            }
        } else if self.has_range() && !self.matches_range(version) {
            return false;
        }

        match &self.condition {
            None => true,
            Some(condition) => match evaluator.evaluate(condition, version) {
                Ok(result) => result,
                Err(e) => {
                    tracing::debug!(
                        package = %self.package,
                        condition = %condition,
                        error = %e,
                        "dependency condition could not be evaluated"
                    );
                    false
                }
            },
        }
    }

    fn matches_range(&self, version: &str) -> bool {
        let Some(candidate) = VersionTriplet::parse_lenient(version) else {
            return false;
        };

        let bounds: [(&Option<String>, fn(&VersionTriplet, &VersionTriplet) -> bool); 4] = [
            (&self.version_lt, |c, b| c < b),
            (&self.version_lte, |c, b| c <= b),
            (&self.version_gte, |c, b| c >= b),
            (&self.version_gt, |c, b| c > b),
        ];

        bounds.iter().all(|(bound, holds)| match bound {
            None => true,
            Some(bound) => VersionTriplet::parse_lenient(bound)
                .map(|b| holds(&candidate, &b))
                .unwrap_or(false),
        })
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package)?;
        let constraints = [
            ("<", &self.version_lt),
            ("<=", &self.version_lte),
            ("==", &self.version_eq),
            (">=", &self.version_gte),
            (">", &self.version_gt),
        ];
        for (op, value) in constraints {
            if let Some(value) = value {
                write!(f, " {}{}", op, value)?;
            }
        }
        if let Some(condition) = &self.condition {
            write!(f, " if [{}]", condition)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::condition::ConditionError;
    use crate::xml::parse_document;

    fn dep(xml: &str) -> Dependency {
        Dependency::from_element(&parse_document(xml, "test").unwrap())
    }

    #[test]
    fn test_from_element_reads_all_attributes() {
        let d = dep(
            r#"<depend version_lt="3" version_lte="2.9" version_eq="2.5" version_gte="2" version_gt="1" condition="$VERSION != 2.6">Sketcher</depend>"#,
        );
        assert_eq!(d.package, "Sketcher");
        assert_eq!(d.version_lt.as_deref(), Some("3"));
        assert_eq!(d.version_lte.as_deref(), Some("2.9"));
        assert_eq!(d.version_eq.as_deref(), Some("2.5"));
        assert_eq!(d.version_gte.as_deref(), Some("2"));
        assert_eq!(d.version_gt.as_deref(), Some("1"));
        assert_eq!(d.condition.as_deref(), Some("$VERSION != 2.6"));
    }

    #[test]
    fn test_from_element_empty_attributes_are_unset() {
        let d = dep(r#"<depend version_eq="">Part</depend>"#);
        assert_eq!(d, Dependency::new("Part"));
        assert!(!d.is_constrained());
    }

    #[test]
    fn test_exact_match() {
        let d = dep(r#"<depend version_eq="1.2.3">Part</depend>"#);
        assert!(d.matches_dependency("1.2.3"));
        assert!(!d.matches_dependency("1.2.4"));
        // string match, not numeric
        assert!(!d.matches_dependency("v1.2.3"));
    }

    #[test]
    fn test_exact_match_bypasses_range() {
        let d = dep(r#"<depend version_eq="5.0" version_lt="2.0">Part</depend>"#);
        assert!(d.matches_dependency("5.0"));
    }

    #[test]
    fn test_half_open_range() {
        let d = dep(r#"<depend version_gte="1.0.0" version_lt="2.0.0">Part</depend>"#);
        assert!(d.matches_dependency("1.5.0"));
        assert!(d.matches_dependency("1.0.0"));
        assert!(!d.matches_dependency("2.0.0"));
        assert!(!d.matches_dependency("0.9.9"));
    }

    #[test]
    fn test_inclusive_and_exclusive_bounds() {
        let d = dep(r#"<depend version_gt="1.0" version_lte="1.4">Part</depend>"#);
        assert!(!d.matches_dependency("1.0"));
        assert!(d.matches_dependency("1.0.1"));
        assert!(d.matches_dependency("1.4.0"));
        assert!(!d.matches_dependency("1.4.1"));
    }

    #[test]
    fn test_partial_triplets_pad_with_zero() {
        let d = dep(r#"<depend version_gte="1.2">Part</depend>"#);
        assert!(d.matches_dependency("1.2.0"));
        assert!(d.matches_dependency("1.2.3"));
        assert!(!d.matches_dependency("1.1.9"));
    }

    #[test]
    fn test_malformed_versions_do_not_match() {
        let d = dep(r#"<depend version_gte="1.0">Part</depend>"#);
        assert!(!d.matches_dependency("latest"));
        assert!(!d.matches_dependency(""));

        let bad_bound = dep(r#"<depend version_gte="one">Part</depend>"#);
        assert!(!bad_bound.matches_dependency("1.0"));
    }

    #[test]
    fn test_unconstrained_matches_anything() {
        let d = dep("<depend>Part</depend>");
        assert!(d.matches_dependency("1.0"));
        assert!(d.matches_dependency("whatever"));
        assert!(d.matches_dependency(""));
    }

    #[test]
    fn test_condition() {
        let d = dep(r#"<depend condition="$VERSION &gt;= 0.20">Part</depend>"#);
        assert!(d.matches_dependency("0.21"));
        assert!(!d.matches_dependency("0.19.4"));
    }

    #[test]
    fn test_condition_combines_with_range() {
        let d = dep(r#"<depend version_lt="2" condition="$VERSION != 1.5">Part</depend>"#);
        assert!(d.matches_dependency("1.4"));
        assert!(!d.matches_dependency("1.5"));
        assert!(!d.matches_dependency("2.1"));
    }

    #[test]
    fn test_broken_condition_does_not_match() {
        let d = dep(r#"<depend condition="$VERSION ==">Part</depend>"#);
        assert!(!d.matches_dependency("1.0"));
    }

    #[test]
    fn test_deeply_nested_condition_does_not_match() {
        let condition = format!(
            "{}$VERSION == 1.0{}",
            "(".repeat(20_000),
            ")".repeat(20_000)
        );
        let d = dep(&format!(r#"<depend condition="{}">x</depend>"#, condition));
        assert!(!d.matches_dependency("1.0"));
    }

    struct AlwaysFails;

    impl ConditionEvaluator for AlwaysFails {
        fn evaluate(&self, _: &str, _: &str) -> Result<bool, ConditionError> {
            Err(ConditionError::UnexpectedEnd)
        }
    }

    struct VersionIsEven;

    impl ConditionEvaluator for VersionIsEven {
        fn evaluate(&self, _: &str, version: &str) -> Result<bool, ConditionError> {
            Ok(version.parse::<u32>().map(|v| v % 2 == 0).unwrap_or(false))
        }
    }

    #[test]
    fn test_custom_evaluator() {
        let d = dep(r#"<depend condition="even">Part</depend>"#);
        assert!(d.matches_with("4", &VersionIsEven));
        assert!(!d.matches_with("3", &VersionIsEven));
        assert!(!d.matches_with("4", &AlwaysFails));
    }

    #[test]
    fn test_display() {
        let d = dep(r#"<depend version_gte="1.0" version_lt="2.0" condition="$X == y">Part</depend>"#);
        assert_eq!(d.to_string(), "Part <2.0 >=1.0 if [$X == y]");
    }
}
