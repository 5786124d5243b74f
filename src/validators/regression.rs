//! Inventory regression against the previous history snapshot.

use crate::models::Issue;
use crate::store::HistoryStore;
use anyhow::Result;
use std::collections::BTreeSet;

/// Warn for every file present in the most recent snapshot but absent from
/// the current inventory. Newly added files never produce an issue, and a
/// missing baseline (first run) is a no-op.
///
/// Must run before the current run's snapshot is appended, otherwise the
/// check compares the inventory against itself.
pub fn check_inventory_regression(
    history: &HistoryStore,
    current_files: &[String],
) -> Result<Vec<Issue>> {
    let Some(previous) = history.latest()? else {
        return Ok(Vec::new());
    };

    let current: BTreeSet<&str> = current_files.iter().map(String::as_str).collect();
    let issues = previous
        .file_list
        .iter()
        .filter(|f| !current.contains(f.as_str()))
        .map(|missing| {
            Issue::warn(
                missing,
                format!("File was present in last health check but is now missing: {missing}"),
            )
        })
        .collect();
    Ok(issues)
}
