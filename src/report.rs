//! Report assembly for the check command.
//!
//! Top-level keys appear only for the components that actually ran. The
//! caller appends exactly one history snapshot per invocation after the
//! selected tiers finish; the inventory-regression check inside Tier 1 must
//! therefore read history before that append happens.

use crate::config::Settings;
use crate::cross;
use crate::kb::{KnowledgeBase, TopicFile};
use crate::models::{Issue, Severity, Tier1Summary, Tier2Summary, TriggerItem, TriggerKind};
use crate::recommend::RecommendationReport;
use crate::store::HistoryStore;
use crate::triggers;
use crate::validators;
use anyhow::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize)]
pub struct Tier1Report {
    pub issues: Vec<Issue>,
    pub summary: Tier1Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tier2Report {
    pub queue: Vec<TriggerItem>,
    pub summary: Tier2Summary,
}

/// The single structured document one invocation prints.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier1: Option<Tier1Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier2: Option<Tier2Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<RecommendationReport>,
}

impl Report {
    /// True when Tier 1 ran and produced at least one fail-severity issue.
    /// Warnings never affect the exit status.
    pub fn has_failures(&self) -> bool {
        self.tier1
            .as_ref()
            .is_some_and(|t| t.summary.fail_count > 0)
    }
}

/// Run all Tier 1 validators (per-file, cross-file, inventory regression)
/// over the discovered list.
///
/// Reads the previous snapshot for the regression check; the caller appends
/// the current run's snapshot only after this returns.
pub fn run_tier1(
    kb: &KnowledgeBase,
    files: &[TopicFile],
    settings: &Settings,
    check_links: bool,
    history: &HistoryStore,
) -> Result<Tier1Report> {
    tracing::debug!(files = files.len(), check_links, "running tier 1 validators");

    let mut issues = validators::run_per_file(files, settings, check_links);
    issues.extend(cross::run_all(kb, files, settings));

    let file_list: Vec<String> = files.iter().map(|f| f.rel_path.clone()).collect();
    issues.extend(validators::regression::check_inventory_regression(
        history, &file_list,
    )?);

    let summary = summarize_tier1(files, &issues);
    Ok(Tier1Report { issues, summary })
}

fn summarize_tier1(files: &[TopicFile], issues: &[Issue]) -> Tier1Summary {
    let mut files_with_fails: BTreeSet<&str> = BTreeSet::new();
    let mut fail_count = 0;
    let mut warn_count = 0;

    for issue in issues {
        match issue.severity {
            Severity::Fail => {
                fail_count += 1;
                files_with_fails.insert(issue.file.as_str());
            }
            Severity::Warn => warn_count += 1,
        }
    }

    Tier1Summary {
        total_files: files.len(),
        fail_count,
        warn_count,
        pass_count: files.len().saturating_sub(files_with_fails.len()),
    }
}

/// Run the Tier 2 trigger engine over the discovered list.
pub fn run_tier2(files: &[TopicFile], settings: &Settings) -> Tier2Report {
    tracing::debug!(files = files.len(), "running tier 2 pre-screening");

    let queue = triggers::run_batch(files, settings);

    let mut trigger_counts: BTreeMap<TriggerKind, usize> = BTreeMap::new();
    let mut flagged: BTreeSet<&str> = BTreeSet::new();
    for item in &queue {
        *trigger_counts.entry(item.trigger).or_default() += 1;
        flagged.insert(item.file.as_str());
    }

    let summary = Tier2Summary {
        total_files_scanned: files.len(),
        files_with_triggers: flagged.len(),
        trigger_counts,
    };
    Tier2Report { queue, summary }
}
