//! `pkgmeta validate` - check a package description for required fields.

use std::path::Path;

use super::common::load_metadata;
use crate::error::CliError;

/// Run the validate command.
pub fn run(file: &Path) -> Result<(), CliError> {
    let metadata = load_metadata(file)?;
    metadata.validate().map_err(|error| CliError::Metadata {
        path: file.display().to_string(),
        error,
    })?;
    println!(
        "{}: ok ({} {})",
        file.display(),
        metadata.name(),
        metadata.version()
    );
    Ok(())
}
