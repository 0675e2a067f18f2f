//! translint - localized package metadata linter
//!
//! Validates a repository of per-language package metadata files against a
//! JSON Schema, a spelling whitelist, and a registry-derived homepage policy.
//!
//! # Repository layout
//!
//! ```text
//! <root>/
//! ├── acme/
//! │   └── widget/
//! │       ├── en.yaml     # English metadata for acme/widget
//! │       └── de.yaml     # German metadata for acme/widget
//! └── other-vendor/
//!     └── tool/
//!         └── en.yaml
//! ```
//!
//! Each file holds a single mapping keyed by its own language code:
//!
//! ```yaml
//! en:
//!   title: Widget
//!   description: A widget for things.
//! ```
//!
//! # Pipeline
//!
//! [`LintRunner`] scans files in order and stops at the first failure.
//! Per file, [`FileValidator`] checks the trailing newline, parses the YAML,
//! matches the top-level key against the filename language, asks
//! [`registry::RegistryCache`] whether the package is private (private
//! packages must declare a `homepage`), and finally runs the schema and
//! spellcheck content checks.
//!
//! Lint failures are ordinary values ([`Verdict::Fail`]); only registry or
//! tooling errors travel on the `Err` channel and abort the run abnormally.

pub mod registry;
pub mod runner;
pub mod schema;
pub mod spellcheck;
pub mod types;
pub mod validator;
pub mod walk;

// Re-exports for convenience
pub use registry::RegistryCache;
pub use runner::{LintRunner, RunOutcome};
pub use schema::SchemaValidator;
pub use spellcheck::SpellChecker;
pub use types::{Language, MetadataFile, PackageId};
pub use validator::{FailReason, Failure, FileValidator, Verdict};
pub use walk::discover_metadata_files;

/// User Agent string sent with registry requests
pub const USER_AGENT: &str = concat!("translint/", env!("CARGO_PKG_VERSION"));
