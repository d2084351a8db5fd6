//! Numeric version triplets used by dependency constraints.
//!
//! Package versions in metadata files are free-form strings, typically
//! `1.2.3` or `v1.2.3`. Range constraints compare them component-wise as
//! `major.minor.patch`. Partially specified versions are padded with zeros,
//! so `1.2` compares equal to `1.2.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;

/// Error returned for strings that are not a numeric triplet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTriplet(pub String);

impl fmt::Display for InvalidTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a version triplet: '{}'", self.0)
    }
}

impl std::error::Error for InvalidTriplet {}

/// A `major.minor.patch` version with missing components treated as zero.
///
/// # Example
///
/// ```
/// use pkgmeta::metadata::VersionTriplet;
///
/// let short: VersionTriplet = "1.2".parse().unwrap();
/// let full: VersionTriplet = "v1.2.0".parse().unwrap();
///
/// assert_eq!(short, full);
/// assert!("1.10.0".parse::<VersionTriplet>().unwrap() > full);
/// assert!("1.2.3-beta".parse::<VersionTriplet>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTriplet(Version);

impl VersionTriplet {
    /// Create a triplet from its components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse a version string, returning `None` when it is not a triplet.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// The triplet as a [`semver::Version`].
    pub fn as_semver(&self) -> &Version {
        &self.0
    }
}

impl FromStr for VersionTriplet {
    type Err = InvalidTriplet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTriplet(s.to_string());

        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let mut parts = [0u64; 3];
        let mut count = 0;
        for component in digits.split('.') {
            if count == parts.len()
                || component.is_empty()
                || !component.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(invalid());
            }
            parts[count] = component.parse().map_err(|_| invalid())?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl Ord for VersionTriplet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for VersionTriplet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> VersionTriplet {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_full_triplet() {
        let v = t("1.2.3");
        assert_eq!((v.major(), v.minor(), v.patch()), (1, 2, 3));
    }

    #[test]
    fn test_parse_pads_missing_components() {
        assert_eq!(t("4"), VersionTriplet::new(4, 0, 0));
        assert_eq!(t("4.1"), VersionTriplet::new(4, 1, 0));
    }

    #[test]
    fn test_parse_accepts_v_prefix_and_whitespace() {
        assert_eq!(t("v1.2.3"), VersionTriplet::new(1, 2, 3));
        assert_eq!(t(" V0.9 "), VersionTriplet::new(0, 9, 0));
    }

    #[test]
    fn test_parse_rejects_non_triplets() {
        for bad in ["", "v", "1..2", "1.2.3.4", "1.x", "1.2.3-rc1", "-1.0", "a.b.c", "1.2."] {
            assert!(bad.parse::<VersionTriplet>().is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(t("1.10.0") > t("1.9.9"));
        assert!(t("2") > t("1.99.99"));
        assert!(t("0.9.9") < t("1.0.0"));
        assert_eq!(t("1.0").cmp(&t("1.0.0")), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(t("v3.1").to_string(), "3.1.0");
    }

    #[test]
    fn test_parse_lenient() {
        assert!(VersionTriplet::parse_lenient("1.0").is_some());
        assert!(VersionTriplet::parse_lenient("latest").is_none());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_display_roundtrip(major in 0u64..10_000, minor in 0u64..10_000, patch in 0u64..10_000) {
                let v = VersionTriplet::new(major, minor, patch);
                let parsed: VersionTriplet = v.to_string().parse().unwrap();
                prop_assert_eq!(parsed, v);
            }

            #[test]
            fn test_ordering_matches_tuple_ordering(
                a in (0u64..50, 0u64..50, 0u64..50),
                b in (0u64..50, 0u64..50, 0u64..50),
            ) {
                let va = VersionTriplet::new(a.0, a.1, a.2);
                let vb = VersionTriplet::new(b.0, b.1, b.2);
                prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
            }
        }
    }
}
