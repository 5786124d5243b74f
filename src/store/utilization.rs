//! Utilization log: file-access events appended by the external read hook.
//!
//! The check and recommend paths only read this store; the write side exists
//! for the hook's `log-access` entry point.

use crate::models::{UtilizationRecord, UtilizationStats};
use crate::store::jsonl::JsonlLog;
use anyhow::Result;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::Path;

pub struct UtilizationStore {
    log: JsonlLog<UtilizationRecord>,
}

impl UtilizationStore {
    /// Store rooted at `<knowledge_root>/.curator/utilization/log.jsonl`.
    pub fn new(knowledge_root: &Path) -> Self {
        let path = knowledge_root
            .join(".curator")
            .join("utilization")
            .join("log.jsonl");
        Self {
            log: JsonlLog::new(path),
        }
    }

    /// Append one access event (hook entry point).
    pub fn record_reference(&self, file: &str, context: &str) -> Result<UtilizationRecord> {
        let record = UtilizationRecord {
            file: file.to_string(),
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            context: context.to_string(),
        };
        self.log.append(&record)?;
        Ok(record)
    }

    /// Aggregate the log into per-file stats. Corrupt lines are skipped.
    pub fn read_utilization(&self) -> Result<BTreeMap<String, UtilizationStats>> {
        let mut stats: BTreeMap<String, UtilizationStats> = BTreeMap::new();
        for record in self.log.read_all()? {
            stats
                .entry(record.file.clone())
                .or_insert_with(|| UtilizationStats::from_first(&record.timestamp))
                .record(&record.timestamp);
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_log(root: &Path, lines: &[&str]) {
        let dir = root.join(".curator").join("utilization");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("log.jsonl"), lines.join("\n")).unwrap();
    }

    fn entry(file: &str, timestamp: &str) -> String {
        format!(
            r#"{{"file":"{file}","timestamp":"{timestamp}","context":"hook"}}"#
        )
    }

    #[test]
    fn test_aggregation() {
        let temp = TempDir::new().unwrap();
        write_log(
            temp.path(),
            &[
                &entry("docs/a/overview.md", "2026-01-05T10:00:00"),
                &entry("docs/a/overview.md", "2026-01-02T08:00:00"),
                &entry("docs/a/topic.md", "2026-01-03T09:00:00"),
                &entry("docs/a/overview.md", "2026-01-08T12:00:00"),
            ],
        );

        let store = UtilizationStore::new(temp.path());
        let stats = store.read_utilization().unwrap();

        let overview = &stats["docs/a/overview.md"];
        assert_eq!(overview.count, 3);
        assert_eq!(overview.first_referenced, "2026-01-02T08:00:00");
        assert_eq!(overview.last_referenced, "2026-01-08T12:00:00");
        assert_eq!(stats["docs/a/topic.md"].count, 1);
    }

    #[test]
    fn test_missing_log_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = UtilizationStore::new(temp.path());
        assert!(store.read_utilization().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_lines_skipped() {
        let temp = TempDir::new().unwrap();
        write_log(
            temp.path(),
            &[
                &entry("docs/a/topic.md", "2026-01-03T09:00:00"),
                "not json at all",
                &entry("docs/a/topic.md", "2026-01-04T09:00:00"),
            ],
        );
        let store = UtilizationStore::new(temp.path());
        let stats = store.read_utilization().unwrap();
        assert_eq!(stats["docs/a/topic.md"].count, 2);
    }

    #[test]
    fn test_record_reference_appends() {
        let temp = TempDir::new().unwrap();
        let store = UtilizationStore::new(temp.path());
        store.record_reference("docs/a/topic.md", "hook").unwrap();
        store.record_reference("docs/a/topic.md", "user").unwrap();

        let stats = store.read_utilization().unwrap();
        assert_eq!(stats["docs/a/topic.md"].count, 2);
    }
}
