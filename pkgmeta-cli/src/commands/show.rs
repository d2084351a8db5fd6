//! `pkgmeta show` - print a parsed package description.

use std::path::Path;

use pkgmeta::metadata::{GenericMetadata, License, PackageMetadata, Url};

use super::common::{load_metadata, print_section};
use crate::error::CliError;

/// Run the show command.
pub fn run(file: &Path, json: bool) -> Result<(), CliError> {
    let metadata = load_metadata(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        print!("{}", render(&metadata));
    }
    Ok(())
}

/// Human-readable summary of a package.
pub fn render(metadata: &PackageMetadata) -> String {
    let mut out = String::new();
    out.push_str(&format!("Name:        {}\n", metadata.name()));
    out.push_str(&format!("Version:     {}\n", metadata.version()));
    out.push_str(&format!("Description: {}\n", metadata.description()));
    out.push_str(&format!("Format:      {}\n", metadata.format()));

    print_section(&mut out, "Maintainers", metadata.maintainers());
    let licenses: Vec<String> = metadata.licenses().iter().map(license_line).collect();
    print_section(&mut out, "Licenses", &licenses);
    let urls: Vec<String> = metadata.urls().iter().map(url_line).collect();
    print_section(&mut out, "URLs", &urls);
    print_section(&mut out, "Authors", metadata.authors());
    print_section(&mut out, "Depends", metadata.dependencies());
    print_section(&mut out, "Conflicts", metadata.conflicts());
    print_section(&mut out, "Replaces", metadata.replacements());
    let generic: Vec<String> = metadata.generic_entries().iter().map(generic_line).collect();
    print_section(&mut out, "Other", &generic);
    out
}

fn license_line(license: &License) -> String {
    match &license.file {
        Some(file) => format!("{} ({})", license.name, file.display()),
        None => license.name.clone(),
    }
}

fn url_line(url: &Url) -> String {
    format!("[{}] {}", url.url_type, url.location)
}

/// `<tag key="value">contents`, attributes sorted by name.
pub fn generic_line(entry: &GenericMetadata) -> String {
    let mut attributes: Vec<_> = entry.attributes.iter().collect();
    attributes.sort();
    let mut line = format!("<{}", entry.tag);
    for (key, value) in attributes {
        line.push_str(&format!(" {}=\"{}\"", key, value));
    }
    line.push('>');
    line.push_str(entry.contents.trim());
    line
}
