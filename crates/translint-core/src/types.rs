//! Identifier newtypes and the per-file metadata record.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A registry package identifier of the form `vendor/name`.
///
/// Identifiers are lowercased on construction so cache lookups and error
/// labels stay consistent regardless of directory casing.
///
/// # Example
///
/// ```
/// use translint_core::types::PackageId;
///
/// let id = PackageId::new("Acme", "Widget");
/// assert_eq!(id.as_str(), "acme/widget");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId(String);

impl PackageId {
    /// Create an identifier from its vendor and name directory components.
    pub fn new(vendor: &str, name: &str) -> Self {
        Self(format!("{}/{}", vendor.to_lowercase(), name.to_lowercase()))
    }

    /// The `vendor/name` form as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A language code derived from a metadata filename stem (e.g. `de`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Language(String);

impl Language {
    /// Create a language code, normalizing to lowercase.
    pub fn new(code: &str) -> Self {
        Self(code.to_lowercase())
    }

    /// The normalized code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One language's metadata document for one package.
///
/// The path encodes the package identifier as the two directory levels above
/// the file, and the language as the filename stem:
/// `<root>/<vendor>/<name>/<language>.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFile {
    /// Location of the YAML document on disk.
    pub path: PathBuf,
    /// Owning package, `vendor/name`.
    pub package: PackageId,
    /// Language code from the filename stem.
    pub language: Language,
}

impl MetadataFile {
    /// Derive package and language from a metadata file path.
    ///
    /// Returns `None` when the path is too shallow to carry the vendor and
    /// name components, or when any component is not valid UTF-8.
    pub fn from_path(path: &Path) -> Option<Self> {
        let language = Language::new(path.file_stem()?.to_str()?);
        let package_dir = path.parent()?;
        let name = package_dir.file_name()?.to_str()?;
        let vendor = package_dir.parent()?.file_name()?.to_str()?;
        if vendor.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            package: PackageId::new(vendor, name),
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_id_is_normalized() {
        let id = PackageId::new("Acme", "HTTP-Client");
        assert_eq!(id.as_str(), "acme/http-client");
        assert_eq!(id.to_string(), "acme/http-client");
    }

    #[test]
    fn metadata_file_from_path() {
        let file = MetadataFile::from_path(Path::new("/repo/acme/widget/de.yaml")).unwrap();
        assert_eq!(file.package, PackageId::new("acme", "widget"));
        assert_eq!(file.language, Language::new("de"));
    }

    #[test]
    fn metadata_file_from_path_yml_extension() {
        let file = MetadataFile::from_path(Path::new("acme/widget/en.yml")).unwrap();
        assert_eq!(file.language.as_str(), "en");
    }

    #[test]
    fn metadata_file_rejects_shallow_path() {
        assert!(MetadataFile::from_path(Path::new("en.yaml")).is_none());
    }
}
