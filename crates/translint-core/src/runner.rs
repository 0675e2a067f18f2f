//! Repository-wide lint run with a first-failure abort policy.

use crate::types::MetadataFile;
use crate::validator::{Failure, FatalError, FileValidator, Verdict};

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every file passed.
    Passed {
        /// How many files were checked.
        checked: usize,
    },
    /// The first failing file. Later files were never examined.
    Failed(Failure),
}

/// Drives the per-file validator over an ordered file list.
///
/// The run aborts on the first failing file rather than aggregating all
/// failures. That is a deliberate policy, not an optimization: exactly one
/// failure reason is shown per run.
#[derive(Debug)]
pub struct LintRunner {
    validator: FileValidator,
}

impl LintRunner {
    /// Wrap a file validator for one run.
    pub fn new(validator: FileValidator) -> Self {
        Self { validator }
    }

    /// Validate `files` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Fatal registry or tooling errors from the validator abort the scan
    /// and propagate unchanged.
    pub async fn run(&mut self, files: &[MetadataFile]) -> Result<RunOutcome, FatalError> {
        for file in files {
            tracing::debug!(path = %file.path.display(), "checking metadata file");
            match self.validator.validate(file).await? {
                Verdict::Pass => {}
                Verdict::Fail(failure) => return Ok(RunOutcome::Failed(failure)),
            }
        }
        Ok(RunOutcome::Passed {
            checked: files.len(),
        })
    }
}
