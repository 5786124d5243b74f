//! `curator log-access` — the external read hook's entry point.
//!
//! Records one utilization event when the given path is a topic file inside
//! the knowledge directory. Anything else is silently skipped so the hook
//! never breaks the caller.

use crate::config::Settings;
use crate::kb::KnowledgeBase;
use crate::store::UtilizationStore;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub fn execute(knowledge_root: &Path, file: &str, context: &str) -> Result<()> {
    let settings = Settings::load(knowledge_root)?;
    let kb = KnowledgeBase::open(knowledge_root, &settings)?;

    match knowledge_rel_path(&kb, file) {
        Some(rel_path) => {
            let store = UtilizationStore::new(kb.root());
            store.record_reference(&rel_path, context)?;
            println!("{} Logged access to {rel_path}", "✓".green());
        }
        None => {
            println!("{} Skipped; not a knowledge-base topic: {file}", "○".yellow());
        }
    }
    Ok(())
}

/// Root-relative path (`<knowledge_dir>/...`) when `file` is a topic file:
/// a `.md` under the knowledge directory, outside `_`/`.`-prefixed
/// directories.
fn knowledge_rel_path(kb: &KnowledgeBase, file: &str) -> Option<String> {
    let path = PathBuf::from(file);
    let absolute = if path.is_absolute() {
        path
    } else {
        kb.root().join(path)
    };

    if absolute.extension().is_none_or(|e| e != "md") {
        return None;
    }
    let canonical = absolute.canonicalize().ok()?;
    let knowledge_dir = kb.knowledge_dir().canonicalize().ok()?;
    let rel = canonical.strip_prefix(&knowledge_dir).ok()?;

    let mut parts = Vec::new();
    for component in rel.components() {
        let part = component.as_os_str().to_str()?;
        if part.starts_with('_') || part.starts_with('.') {
            return None;
        }
        parts.push(part);
    }

    Some(format!("{}/{}", kb.knowledge_dir_name(), parts.join("/")))
}
