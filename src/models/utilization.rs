//! Utilization log records and their read-side aggregation.

use serde::{Deserialize, Serialize};

/// One file-access event, appended by the external read hook.
///
/// Timestamps are kept as the strings the hook wrote; ISO-8601 strings order
/// lexically, and parsing is deferred to the one consumer that needs real
/// date arithmetic (the recommendation gate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationRecord {
    /// Path relative to the knowledge-base root, e.g. `docs/area/topic.md`
    pub file: String,
    pub timestamp: String,
    /// Free-form label describing how the file was referenced
    pub context: String,
}

/// Per-file aggregate computed from the utilization log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationStats {
    pub count: u64,
    pub first_referenced: String,
    pub last_referenced: String,
}

impl UtilizationStats {
    pub fn from_first(timestamp: &str) -> Self {
        Self {
            count: 0,
            first_referenced: timestamp.to_string(),
            last_referenced: timestamp.to_string(),
        }
    }

    /// Fold one more event into the aggregate.
    pub fn record(&mut self, timestamp: &str) {
        self.count += 1;
        if timestamp < self.first_referenced.as_str() {
            self.first_referenced = timestamp.to_string();
        }
        if timestamp > self.last_referenced.as_str() {
            self.last_referenced = timestamp.to_string();
        }
    }
}
