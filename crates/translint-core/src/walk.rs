//! Metadata tree traversal.

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::types::MetadataFile;

/// Walk a metadata tree and return every per-language file, sorted by path.
///
/// The layout is fixed at `<root>/<vendor>/<name>/<language>.{yaml,yml}`;
/// entries at other depths or with other extensions are ignored, as are
/// hidden directories like `.git`.
pub fn discover_metadata_files(root: &Path) -> Result<Vec<MetadataFile>> {
    let mut files = Vec::new();

    for vendor_entry in fs::read_dir(root)? {
        let vendor_path = vendor_entry?.path();
        if !vendor_path.is_dir() || is_hidden(&vendor_path) {
            continue;
        }

        for package_entry in fs::read_dir(&vendor_path)? {
            let package_path = package_entry?.path();
            if !package_path.is_dir() || is_hidden(&package_path) {
                continue;
            }

            for entry in fs::read_dir(&package_path)? {
                let path = entry?.path();
                if !path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                    continue;
                }
                match MetadataFile::from_path(&path) {
                    Some(file) => files.push(file),
                    None => {
                        tracing::warn!(
                            path = %path.display(),
                            "skipping metadata file with undecodable path"
                        );
                    }
                }
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
