//! `pkgmeta deps` - list dependency constraints and check candidate versions.

use std::collections::HashMap;
use std::path::Path;

use pkgmeta::metadata::{Dependency, PackageMetadata};

use super::common::load_metadata;
use crate::error::CliError;

/// How a candidate relates to one declared constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No candidate version was supplied for the package.
    Unchecked,
    /// The candidate satisfies the constraint.
    Satisfied(String),
    /// The candidate violates the constraint.
    Violated(String),
}

/// Run the deps command.
pub fn run(file: &Path, candidates: &[String]) -> Result<(), CliError> {
    let candidates = parse_candidates(candidates)?;
    let metadata = load_metadata(file)?;

    let (report, violations) = check(&metadata, &candidates);
    print!("{}", report);

    if violations > 0 {
        return Err(CliError::Unsatisfied(violations));
    }
    Ok(())
}

/// Parse `NAME=VERSION` pairs.
pub fn parse_candidates(raw: &[String]) -> Result<HashMap<String, String>, CliError> {
    raw.iter()
        .map(|pair| parse_candidate(pair))
        .collect::<Result<HashMap<_, _>, _>>()
}

fn parse_candidate(pair: &str) -> Result<(String, String), CliError> {
    let invalid = || {
        CliError::InvalidArgument(format!(
            "candidate '{}' must look like NAME=VERSION",
            pair
        ))
    };
    let (name, version) = pair.split_once('=').ok_or_else(invalid)?;
    let (name, version) = (name.trim(), version.trim());
    if name.is_empty() || version.is_empty() {
        return Err(invalid());
    }
    Ok((name.to_string(), version.to_string()))
}

/// Build the report and count violations.
///
/// A dependency is violated when its candidate does not match. A conflict is
/// violated when its candidate does match. Replacements are informational.
pub fn check(
    metadata: &PackageMetadata,
    candidates: &HashMap<String, String>,
) -> (String, usize) {
    let mut out = String::new();
    let mut violations = 0;

    let groups: [(&str, &[Dependency], bool); 3] = [
        ("Depends", metadata.dependencies(), false),
        ("Conflicts", metadata.conflicts(), true),
        ("Replaces", metadata.replacements(), false),
    ];

    for (title, entries, inverted) in groups {
        if entries.is_empty() {
            continue;
        }
        out.push_str(title);
        out.push_str(":\n");
        for dependency in entries {
            let verdict = evaluate(dependency, candidates, inverted);
            let suffix = match &verdict {
                Verdict::Unchecked => String::new(),
                Verdict::Satisfied(version) => format!("  [ok: {}]", version),
                Verdict::Violated(version) => format!("  [FAILED: {}]", version),
            };
            if title != "Replaces" && matches!(verdict, Verdict::Violated(_)) {
                violations += 1;
            }
            out.push_str(&format!("  {}{}\n", dependency, suffix));
        }
    }

    if out.is_empty() {
        out.push_str("No dependencies declared\n");
    }
    (out, violations)
}

/// Evaluate one constraint against the candidate for its package, if any.
pub fn evaluate(
    dependency: &Dependency,
    candidates: &HashMap<String, String>,
    inverted: bool,
) -> Verdict {
    let Some(version) = candidates.get(&dependency.package) else {
        return Verdict::Unchecked;
    };
    let matches = dependency.matches_dependency(version);
    tracing::debug!(
        package = %dependency.package,
        candidate = %version,
        matches,
        "Checked constraint"
    );
    if matches != inverted {
        Verdict::Satisfied(version.clone())
    } else {
        Verdict::Violated(version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<package format="3">
  <name>nav</name>
  <depend version_gte="1.0.0" version_lt="2.0.0">planner</depend>
  <depend>geometry</depend>
  <conflict version_lt="0.3">old_nav</conflict>
</package>"#;

    fn candidates(pairs: &[&str]) -> HashMap<String, String> {
        let raw: Vec<String> = pairs.iter().map(|s| s.to_string()).collect();
        parse_candidates(&raw).unwrap()
    }

    #[test]
    fn test_parse_candidate() {
        assert_eq!(
            parse_candidate("planner = 1.5.0").unwrap(),
            ("planner".to_string(), "1.5.0".to_string())
        );
        assert!(parse_candidate("planner").is_err());
        assert!(parse_candidate("=1.0").is_err());
        assert!(parse_candidate("planner=").is_err());
    }

    #[test]
    fn test_check_without_candidates() {
        let metadata = PackageMetadata::from_xml_str(XML).unwrap();
        let (report, violations) = check(&metadata, &HashMap::new());

        assert_eq!(violations, 0);
        assert!(report.contains("Depends:\n  planner <2.0.0 >=1.0.0\n  geometry\n"));
        assert!(report.contains("Conflicts:\n  old_nav <0.3\n"));
        assert!(!report.contains("Replaces:"));
    }

    #[test]
    fn test_check_reports_violations() {
        let metadata = PackageMetadata::from_xml_str(XML).unwrap();
        let (report, violations) = check(
            &metadata,
            &candidates(&["planner=2.0.0", "geometry=9", "old_nav=0.2"]),
        );

        assert_eq!(violations, 2);
        assert!(report.contains("planner <2.0.0 >=1.0.0  [FAILED: 2.0.0]"));
        assert!(report.contains("geometry  [ok: 9]"));
        assert!(report.contains("old_nav <0.3  [FAILED: 0.2]"));
    }

    #[test]
    fn test_conflict_not_matching_is_ok() {
        let metadata = PackageMetadata::from_xml_str(XML).unwrap();
        let (_, violations) = check(
            &metadata,
            &candidates(&["planner=1.5.0", "old_nav=0.5"]),
        );
        assert_eq!(violations, 0);
    }

    #[test]
    fn test_no_dependencies() {
        let metadata = PackageMetadata::from_xml_str(r#"<package format="3"/>"#).unwrap();
        let (report, violations) = check(&metadata, &HashMap::new());
        assert_eq!(report, "No dependencies declared\n");
        assert_eq!(violations, 0);
    }
}
