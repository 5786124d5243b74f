//! Health history log: one snapshot per check run, append-only.

use crate::models::{Snapshot, Tier1Summary, Tier2Summary};
use crate::store::jsonl::JsonlLog;
use anyhow::Result;
use chrono::Utc;
use std::path::Path;

pub struct HistoryStore {
    log: JsonlLog<Snapshot>,
}

impl HistoryStore {
    /// Store rooted at `<knowledge_root>/.curator/history/health-log.jsonl`.
    pub fn new(knowledge_root: &Path) -> Self {
        let path = knowledge_root
            .join(".curator")
            .join("history")
            .join("health-log.jsonl");
        Self {
            log: JsonlLog::new(path),
        }
    }

    /// Append one timestamped snapshot. Prior entries are never touched.
    pub fn record_snapshot(
        &self,
        tier1: Option<Tier1Summary>,
        tier2: Option<Tier2Summary>,
        file_list: Vec<String>,
    ) -> Result<Snapshot> {
        let snapshot = Snapshot {
            timestamp: Utc::now(),
            tier1,
            tier2,
            file_list,
        };
        self.log.append(&snapshot)?;
        Ok(snapshot)
    }

    /// The most recent `limit` snapshots, chronological (oldest first).
    pub fn read_history(&self, limit: usize) -> Result<Vec<Snapshot>> {
        self.log.read_last(limit)
    }

    /// The single most recent snapshot, if any.
    pub fn latest(&self) -> Result<Option<Snapshot>> {
        Ok(self.read_history(1)?.pop())
    }
}
