//! `curator check` — run Tier 1 and/or Tier 2 over a knowledge base and
//! print one JSON report.

use crate::config::Settings;
use crate::kb::KnowledgeBase;
use crate::report::{self, Report};
use crate::store::HistoryStore;
use anyhow::Result;
use std::path::Path;

/// Exit code 0 when Tier 1 ran clean (or did not run); 1 when Tier 1
/// produced fail-severity issues. Warnings never affect the exit code.
pub fn execute(knowledge_root: &Path, tier2: bool, both: bool, check_links: bool) -> Result<i32> {
    let settings = Settings::load(knowledge_root)?;
    let kb = KnowledgeBase::open(knowledge_root, &settings)?;
    let files = kb.discover()?;
    let file_list: Vec<String> = files.iter().map(|f| f.rel_path.clone()).collect();
    let history = HistoryStore::new(kb.root());

    let run_tier1 = both || !tier2;
    let run_tier2 = both || tier2;

    let mut output = Report::default();
    if run_tier1 {
        // Reads the previous snapshot (inventory regression) before the
        // current run's snapshot is appended below.
        output.tier1 = Some(report::run_tier1(
            &kb,
            &files,
            &settings,
            check_links,
            &history,
        )?);
    }
    if run_tier2 {
        output.tier2 = Some(report::run_tier2(&files, &settings));
    }

    // Exactly one snapshot per invocation, covering the full discovered
    // list regardless of which tiers ran.
    history.record_snapshot(
        output.tier1.as_ref().map(|t| t.summary.clone()),
        output.tier2.as_ref().map(|t| t.summary.clone()),
        file_list,
    )?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(if output.has_failures() { 1 } else { 0 })
}
