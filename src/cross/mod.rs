//! Cross-file consistency validators.
//!
//! These run once per invocation over the whole discovered set, unlike the
//! per-file Tier 1 rules. Same contract otherwise: findings are issues,
//! never errors; unreadable collaborator files degrade to absent.

pub mod coverage;
pub mod duplicates;
pub mod link_graph;
pub mod manifest;
pub mod naming;
pub mod plan;
pub mod proposals;

use crate::config::Settings;
use crate::kb::{KnowledgeBase, TopicFile};
use crate::models::Issue;
use std::collections::BTreeMap;

/// Managed-section markers in agent-maintained manifests.
pub const MARKER_BEGIN: &str = "<!-- curator:kb:begin -->";
pub const MARKER_END: &str = "<!-- curator:kb:end -->";

/// Run every cross-file validator in fixed order.
pub fn run_all(kb: &KnowledgeBase, files: &[TopicFile], settings: &Settings) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(coverage::check_coverage(kb, files));
    issues.extend(manifest::check_index_sync(kb, files));
    issues.extend(manifest::check_manifest_sync(kb, files));
    issues.extend(plan::check_curation_plan_sync(kb, files));
    issues.extend(proposals::check_proposal_integrity(kb, settings));
    issues.extend(link_graph::check_link_graph(files));
    issues.extend(duplicates::check_duplicate_content(
        files,
        settings.similarity_threshold,
    ));
    issues.extend(naming::check_naming_conventions(kb, files));
    issues
}

/// Topic files (not overviews, not reference companions) grouped by area,
/// in discovery order.
pub(crate) fn topics_by_area<'a>(files: &'a [TopicFile]) -> BTreeMap<&'a str, Vec<&'a TopicFile>> {
    let mut areas: BTreeMap<&str, Vec<&TopicFile>> = BTreeMap::new();
    for file in files {
        let Some(area) = file.area() else { continue };
        if file.is_overview() || file.is_reference_companion() {
            areas.entry(area).or_default();
            continue;
        }
        areas.entry(area).or_default().push(file);
    }
    areas
}

/// Text between the managed-section markers, or `None` when absent.
pub(crate) fn managed_section(text: &str) -> Option<&str> {
    let begin = text.find(MARKER_BEGIN)?;
    let end = text.find(MARKER_END)?;
    if end <= begin {
        return None;
    }
    Some(&text[begin + MARKER_BEGIN.len()..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_section() {
        let text = format!("intro\n{MARKER_BEGIN}\ncontent here\n{MARKER_END}\noutro");
        assert_eq!(managed_section(&text), Some("\ncontent here\n"));
        assert_eq!(managed_section("no markers"), None);
        let reversed = format!("{MARKER_END}x{MARKER_BEGIN}");
        assert_eq!(managed_section(&reversed), None);
    }
}
