//! Integration tests for theme discovery.
//!
//! These tests verify:
//! - directory themes and zipped themes load the same metadata
//! - archives with the metadata at the root or inside one folder
//! - ThemeManager ordering and skipping of broken themes
//!
//! Run with: `cargo test --test themes`

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use pkgmeta::theme::{Theme, ThemeError, ThemeManager, ThemeSourceKind, METADATA_FILE};

// ============================================================================
// Helper Functions
// ============================================================================

fn theme_xml(name: &str) -> String {
    format!(
        r#"<package format="3">
  <name>{}</name>
  <version>2.1.0</version>
  <description>A theme</description>
  <maintainer email="themes@example.org">Theme Team</maintainer>
  <license>MIT</license>
  <palette accent="teal">dark</palette>
</package>"#,
        name
    )
}

/// Create `<root>/<folder>/metadata.xml`.
fn make_dir_theme(root: &Path, folder: &str, name: &str) -> PathBuf {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(METADATA_FILE), theme_xml(name)).unwrap();
    dir
}

/// Create a zip archive holding the given `(entry, content)` pairs.
fn make_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    for (entry, content) in entries {
        zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

// ============================================================================
// Theme
// ============================================================================

#[test]
fn test_archive_and_directory_load_same_metadata() {
    let temp = TempDir::new().unwrap();
    let dir = make_dir_theme(temp.path(), "nocturne", "Nocturne");
    let archive = temp.path().join("nocturne.theme");
    make_zip(&archive, &[(METADATA_FILE, &theme_xml("Nocturne"))]);

    let from_dir = Theme::load(&dir).unwrap();
    let from_zip = Theme::load(&archive).unwrap();

    assert_eq!(from_dir.source_kind(), ThemeSourceKind::Directory);
    assert_eq!(from_zip.source_kind(), ThemeSourceKind::Archive);
    assert_eq!(from_dir.metadata(), from_zip.metadata());
    assert_eq!(from_zip.metadata().generic("palette")[0].contents, "dark");
}

#[test]
fn test_archive_with_top_level_folder() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("wrapped.theme");
    let xml = theme_xml("Wrapped");
    make_zip(
        &archive,
        &[
            ("wrapped/style.qss", "QWidget {}"),
            ("wrapped/metadata.xml", &xml),
        ],
    );

    let theme = Theme::load(&archive).unwrap();
    assert_eq!(theme.name(), "Wrapped");
}

#[test]
fn test_archive_without_metadata() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("empty.theme");
    make_zip(&archive, &[("style.qss", "QWidget {}")]);

    let err = Theme::load(&archive).unwrap_err();
    assert!(matches!(err, ThemeError::MissingMetadata { .. }));
}

#[test]
fn test_archive_with_bad_metadata() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("bad.theme");
    make_zip(&archive, &[(METADATA_FILE, "<theme format=\"3\"/>")]);

    let err = Theme::load(&archive).unwrap_err();
    assert!(matches!(err, ThemeError::Metadata(_)));
    assert!(err.to_string().contains("root element"));
}

#[test]
fn test_unnamed_archive_uses_file_stem() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("anonymous.theme");
    make_zip(&archive, &[(METADATA_FILE, r#"<package format="3"/>"#)]);

    assert_eq!(Theme::load(&archive).unwrap().name(), "anonymous");
}

// ============================================================================
// ThemeManager
// ============================================================================

#[test]
fn test_manager_mixes_directories_and_archives() {
    let temp = TempDir::new().unwrap();
    make_dir_theme(temp.path(), "solar", "Solarized");
    make_zip(
        &temp.path().join("amber.theme"),
        &[(METADATA_FILE, &theme_xml("Amber"))],
    );
    // wrong extension is not picked up
    make_zip(
        &temp.path().join("ignored.zip"),
        &[(METADATA_FILE, &theme_xml("Ignored"))],
    );
    // broken archive is skipped
    fs::write(temp.path().join("corrupt.theme"), b"PK\x03\x04garbage").unwrap();

    let mut manager = ThemeManager::new(temp.path());
    assert_eq!(manager.rescan(), 2);
    assert_eq!(manager.theme_names(), vec!["Amber", "Solarized"]);
    assert_eq!(
        manager.theme("Amber").unwrap().source_kind(),
        ThemeSourceKind::Archive
    );
}

#[test]
fn test_manager_custom_archive_extension() {
    let temp = TempDir::new().unwrap();
    make_zip(
        &temp.path().join("mint.zip"),
        &[(METADATA_FILE, &theme_xml("Mint"))],
    );

    let mut manager = ThemeManager::new(temp.path()).with_archive_extension("zip");
    assert_eq!(manager.rescan(), 1);
    assert_eq!(manager.themes()[0].name(), "Mint");
}
