//! `curator history` — list recent health snapshots.

use crate::store::HistoryStore;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn execute(knowledge_root: &Path, limit: usize) -> Result<()> {
    let store = HistoryStore::new(knowledge_root);
    let snapshots = store.read_history(limit)?;

    if snapshots.is_empty() {
        println!("{} No health snapshots recorded yet", "○".yellow());
        return Ok(());
    }

    println!("{}", "Health History".bold());
    println!();
    for snapshot in snapshots {
        let mut parts = vec![format!("{} files", snapshot.file_list.len())];
        if let Some(tier1) = &snapshot.tier1 {
            let fails = if tier1.fail_count > 0 {
                format!("{} fails", tier1.fail_count).red().to_string()
            } else {
                "0 fails".green().to_string()
            };
            parts.push(format!("{fails}, {} warns", tier1.warn_count));
        }
        if let Some(tier2) = &snapshot.tier2 {
            parts.push(format!(
                "{} files flagged for review",
                tier2.files_with_triggers
            ));
        }
        println!(
            "  {}  {}",
            snapshot
                .timestamp
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .dimmed(),
            parts.join(" · ")
        );
    }
    Ok(())
}
