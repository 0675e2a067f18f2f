//! JSON Schema validation with a per-call `required` override.
//!
//! The base schema is loaded once and never mutated. Each validation call
//! derives an effective schema from it: for private packages the `required`
//! array is replaced with exactly `["homepage"]`, overriding (not merging
//! with) whatever the base declares.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

/// Failures while loading or compiling the schema. These are tooling
/// problems, not metadata defects, and abort the run.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("cannot read schema file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("schema file '{path}' is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema could not be compiled: {reason}")]
    Compile { reason: String },
}

/// A single schema violation with the location it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Human-readable description from the schema engine.
    pub message: String,
    /// JSON Pointer to the offending property; empty when the violation
    /// applies to the whole document.
    pub property_path: String,
}

/// Outcome of one schema evaluation.
///
/// Violations are collected exhaustively in a single pass; the validity
/// flag is the engine's aggregate verdict over the same effective schema.
#[derive(Debug, Clone)]
pub struct SchemaReport {
    /// The engine's aggregate validity verdict.
    pub is_valid: bool,
    /// Every violation found, in engine order.
    pub violations: Vec<Violation>,
}

/// Wraps the schema engine around an immutable base schema document.
#[derive(Debug)]
pub struct SchemaValidator {
    base: Value,
}

impl SchemaValidator {
    /// Wrap an already-parsed base schema.
    pub fn new(base: Value) -> Self {
        Self { base }
    }

    /// Load the base schema from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Read`] or [`SchemaError::Parse`] when the file
    /// cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let base: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::new(base))
    }

    /// The schema actually applied to one record.
    ///
    /// A derived copy of the base; the base itself stays correct across
    /// calls for different packages within the same run.
    fn effective_schema(&self, requires_homepage: bool) -> Value {
        let mut schema = self.base.clone();
        if requires_homepage {
            if let Some(object) = schema.as_object_mut() {
                object.insert("required".to_string(), json!(["homepage"]));
            }
        }
        schema
    }

    /// Validate `record` against the effective schema.
    ///
    /// Unlike the per-file pipeline, this does not short-circuit: every
    /// structural problem is reported in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the effective schema cannot be
    /// compiled by the engine.
    pub fn validate(
        &self,
        record: &Value,
        requires_homepage: bool,
    ) -> Result<SchemaReport, SchemaError> {
        let schema = self.effective_schema(requires_homepage);
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| SchemaError::Compile {
                reason: e.to_string(),
            })?;

        let violations: Vec<Violation> = validator
            .iter_errors(record)
            .map(|e| Violation {
                message: e.to_string(),
                property_path: e.instance_path.to_string(),
            })
            .collect();

        Ok(SchemaReport {
            is_valid: validator.is_valid(record),
            violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "description": { "type": "string" },
                "homepage": { "type": "string" }
            },
            "required": ["title"],
            "additionalProperties": false
        })
    }

    #[test]
    fn public_package_uses_base_schema_unchanged() {
        let validator = SchemaValidator::new(base_schema());
        // Valid under the base schema: title present, no homepage needed.
        let report = validator
            .validate(&json!({ "title": "Widget" }), false)
            .unwrap();
        assert!(report.is_valid);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn private_package_requires_exactly_homepage() {
        let validator = SchemaValidator::new(base_schema());

        // The base's own required list ("title") is overridden, not merged:
        // homepage alone satisfies the required rule for a private package.
        let report = validator
            .validate(&json!({ "homepage": "https://example.com" }), true)
            .unwrap();
        assert!(report.is_valid, "{:?}", report.violations);

        let report = validator
            .validate(&json!({ "title": "Widget" }), true)
            .unwrap();
        assert!(!report.is_valid);
        assert!(
            report
                .violations
                .iter()
                .any(|v| v.message.contains("homepage"))
        );
    }

    #[test]
    fn base_schema_not_mutated_across_calls() {
        let validator = SchemaValidator::new(base_schema());
        validator
            .validate(&json!({ "homepage": "x" }), true)
            .unwrap();

        // A later public validation must see the original required list.
        let report = validator.validate(&json!({}), false).unwrap();
        assert!(!report.is_valid);
        assert!(report.violations.iter().any(|v| v.message.contains("title")));
    }

    #[test]
    fn all_violations_collected_in_one_pass() {
        let validator = SchemaValidator::new(base_schema());
        let report = validator
            .validate(&json!({ "title": 1, "description": 2 }), false)
            .unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.violations.len(), 2);
    }

    #[test]
    fn whole_document_violation_has_empty_path() {
        let validator = SchemaValidator::new(base_schema());
        let report = validator.validate(&json!({}), false).unwrap();
        // Missing required property is reported against the document root.
        assert_eq!(report.violations[0].property_path, "");
    }

    #[test]
    fn property_violation_carries_pointer() {
        let validator = SchemaValidator::new(base_schema());
        let report = validator
            .validate(&json!({ "title": 42 }), false)
            .unwrap();
        assert_eq!(report.violations[0].property_path, "/title");
    }
}
