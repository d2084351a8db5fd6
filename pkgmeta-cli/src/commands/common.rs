//! Helpers shared by several commands.

use std::path::Path;

use pkgmeta::metadata::PackageMetadata;

use crate::error::CliError;

/// Parse a package description, attaching the path to any error.
pub fn load_metadata(path: &Path) -> Result<PackageMetadata, CliError> {
    PackageMetadata::from_file(path).map_err(|error| CliError::Metadata {
        path: path.display().to_string(),
        error,
    })
}

/// Print a titled list, skipping empty ones.
pub fn print_section<T: std::fmt::Display>(out: &mut String, title: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    out.push_str(title);
    out.push_str(":\n");
    for item in items {
        out.push_str(&format!("  {}\n", item));
    }
}
