//! `curator recommend` — utilization-driven curation recommendations.

use crate::config::Settings;
use crate::kb::KnowledgeBase;
use crate::recommend::generate_recommendations;
use crate::store::UtilizationStore;
use anyhow::Result;
use std::path::Path;

pub fn execute(knowledge_root: &Path, min_reads: u64, min_days: i64) -> Result<()> {
    let settings = Settings::load(knowledge_root)?;
    let kb = KnowledgeBase::open(knowledge_root, &settings)?;
    let files = kb.discover()?;
    let store = UtilizationStore::new(kb.root());

    let report = generate_recommendations(&files, &store, &settings, min_reads, min_days)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
