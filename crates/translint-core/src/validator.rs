//! Per-file validation pipeline.
//!
//! Checks run in a fixed order and stop at the first failing step:
//! trailing newline, YAML parse, language key, registry privacy, then the
//! content checks (schema diagnostics, spellcheck, schema verdict).
//! Every lint failure is returned as a [`Verdict`]; only registry and
//! tooling errors use the `Err` channel.

use std::fs;

use serde_json::Value;
use thiserror::Error;

use crate::registry::{RegistryCache, RegistryError};
use crate::schema::{SchemaError, SchemaValidator, Violation};
use crate::spellcheck::SpellChecker;
use crate::types::{Language, MetadataFile, PackageId};

/// Prose properties subject to spellchecking, in check order.
const SPELLCHECKED_PROPERTIES: [&str; 2] = ["title", "description"];

/// Errors that abort the run instead of failing a single file.
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Why a metadata file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The file does not end with exactly one trailing newline.
    BadLineEnding,
    /// The content is not well-formed YAML.
    ParseError(String),
    /// The top-level key does not match the filename-derived language.
    LanguageKeyMismatch,
    /// The schema engine judged the record invalid.
    SchemaViolation(Vec<Violation>),
    /// A prose property contains words outside every whitelist.
    SpellcheckFailure {
        /// The property whose value failed (`title` or `description`).
        property: String,
        /// Unknown words, first occurrence first.
        words: Vec<String>,
    },
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadLineEnding => {
                write!(f, "file must end with exactly one trailing newline")
            }
            Self::ParseError(message) => write!(f, "invalid YAML: {message}"),
            Self::LanguageKeyMismatch => {
                write!(f, "top-level key does not match the file's language")
            }
            Self::SchemaViolation(violations) => {
                if violations.is_empty() {
                    write!(f, "schema validation failed")
                } else {
                    let messages: Vec<&str> =
                        violations.iter().map(|v| v.message.as_str()).collect();
                    write!(f, "schema validation failed: {}", messages.join("; "))
                }
            }
            Self::SpellcheckFailure { property, words } => {
                write!(f, "unknown words in '{property}': {}", words.join(", "))
            }
        }
    }
}

/// A failed verdict, labeled the way the lint output reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Package the file belongs to.
    pub package: PackageId,
    /// Language of the failing file.
    pub language: Language,
    /// What went wrong.
    pub reason: FailReason,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Package: {}; Language: {}]: {}",
            self.package, self.language, self.reason
        )
    }
}

/// Outcome of validating a single metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every check passed.
    Pass,
    /// The first failing check.
    Fail(Failure),
}

/// Runs the full check sequence for one metadata file.
#[derive(Debug)]
pub struct FileValidator {
    registry: RegistryCache,
    schema: SchemaValidator,
    spellchecker: SpellChecker,
}

impl FileValidator {
    /// Assemble the pipeline from its collaborators. The registry cache is
    /// owned here so its memoization spans every file of the run.
    pub fn new(
        registry: RegistryCache,
        schema: SchemaValidator,
        spellchecker: SpellChecker,
    ) -> Self {
        Self {
            registry,
            schema,
            spellchecker,
        }
    }

    /// Validate one file, fail-fast.
    ///
    /// # Errors
    ///
    /// Only registry lookups, unreadable files, and schema compilation
    /// problems come back as `Err`; everything a maintainer can fix in the
    /// metadata itself is a [`Verdict::Fail`].
    pub async fn validate(&mut self, file: &MetadataFile) -> Result<Verdict, FatalError> {
        let content = fs::read_to_string(&file.path).map_err(|e| FatalError::Io {
            path: file.path.display().to_string(),
            source: e,
        })?;

        if !has_single_trailing_newline(&content) {
            return Ok(file.fail(FailReason::BadLineEnding));
        }

        let doc: serde_yaml::Value = match serde_yaml::from_str(&content) {
            Ok(doc) => doc,
            Err(e) => return Ok(file.fail(FailReason::ParseError(e.to_string()))),
        };

        let Some(record) = doc.get(file.language.as_str()) else {
            return Ok(file.fail(FailReason::LanguageKeyMismatch));
        };

        let requires_homepage = self.registry.is_private(&file.package).await?;

        let record = match yaml_to_json(record) {
            Ok(record) => record,
            Err(reason) => return Ok(file.fail(FailReason::ParseError(reason))),
        };

        self.validate_content(file, &record, requires_homepage)
    }

    /// Content checks on the language-scoped record.
    ///
    /// Schema violations are always surfaced as diagnostics, even when the
    /// file ultimately passes or fails for another reason. The spellcheck
    /// short-circuits on the first failing property; the schema verdict is
    /// applied last.
    fn validate_content(
        &self,
        file: &MetadataFile,
        record: &Value,
        requires_homepage: bool,
    ) -> Result<Verdict, FatalError> {
        let report = self.schema.validate(record, requires_homepage)?;
        for violation in &report.violations {
            tracing::warn!(
                package = %file.package,
                language = %file.language,
                property = %violation.property_path,
                "{}",
                violation.message
            );
        }

        for property in SPELLCHECKED_PROPERTIES {
            let Some(text) = record.get(property).and_then(Value::as_str) else {
                continue;
            };
            let words = self.spellchecker.check(text, &file.language);
            if !words.is_empty() {
                return Ok(file.fail(FailReason::SpellcheckFailure {
                    property: property.to_string(),
                    words,
                }));
            }
        }

        if !report.is_valid {
            return Ok(file.fail(FailReason::SchemaViolation(report.violations)));
        }

        Ok(Verdict::Pass)
    }
}

impl MetadataFile {
    fn fail(&self, reason: FailReason) -> Verdict {
        Verdict::Fail(Failure {
            package: self.package.clone(),
            language: self.language.clone(),
            reason,
        })
    }
}

/// True iff `content` ends with a single `\n` (not zero, not two or more).
fn has_single_trailing_newline(content: &str) -> bool {
    content.ends_with('\n') && !content.ends_with("\n\n")
}

/// Convert a YAML value tree to the JSON value tree the schema engine
/// understands. Metadata records use only the JSON-compatible subset of
/// YAML; anything outside it is reported as a parse-level problem.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("number {f} has no JSON representation"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (key, value) in map {
                let key = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
