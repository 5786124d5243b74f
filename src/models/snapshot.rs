//! History snapshot records.

use crate::models::trigger::TriggerKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate result of one Tier 1 run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier1Summary {
    pub total_files: usize,
    pub fail_count: usize,
    pub warn_count: usize,
    /// Files with no fail-severity issue
    pub pass_count: usize,
}

/// Aggregate result of one Tier 2 pre-screening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier2Summary {
    pub total_files_scanned: usize,
    pub files_with_triggers: usize,
    pub trigger_counts: BTreeMap<TriggerKind, usize>,
}

/// One timestamped entry in the health history log.
///
/// Snapshots are append-only; the most recent one is the baseline the next
/// run's inventory-regression check compares against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier1: Option<Tier1Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier2: Option<Tier2Summary>,
    /// Paths relative to the knowledge-base root discovered during the run
    #[serde(default)]
    pub file_list: Vec<String>,
}
