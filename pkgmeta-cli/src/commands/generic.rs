//! `pkgmeta generic` - look up records for a non-standard tag.

use std::path::Path;

use super::common::load_metadata;
use super::show::generic_line;
use crate::error::CliError;

/// Run the generic command.
pub fn run(file: &Path, tag: &str) -> Result<(), CliError> {
    let metadata = load_metadata(file)?;
    let entries = metadata.generic(tag);
    tracing::debug!(tag = %tag, count = entries.len(), "Generic lookup");

    if entries.is_empty() {
        println!("No <{}> entries", tag);
        return Ok(());
    }
    for entry in &entries {
        println!("{}", generic_line(entry));
    }
    Ok(())
}
