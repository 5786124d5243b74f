//! Validation issue types shared by all Tier 1 and cross-file validators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation issue.
///
/// `Fail` issues affect the process exit status; `Warn` issues never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fail,
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fail => write!(f, "fail"),
            Severity::Warn => write!(f, "warn"),
        }
    }
}

/// A single finding produced by a validator.
///
/// Issues are the product of a health check, not errors: a rule that finds
/// something wrong with a file returns issues, it never returns `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Path relative to the knowledge-base root, e.g. `docs/area/topic.md`
    pub file: String,
    pub message: String,
    pub severity: Severity,
}

impl Issue {
    pub fn fail(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            severity: Severity::Fail,
        }
    }

    pub fn warn(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            severity: Severity::Warn,
        }
    }
}
