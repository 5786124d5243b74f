//! Whole-set link graph: orphan detection and overview completeness.
//!
//! Per-file link resolution already reports broken targets; this pass looks
//! at the graph as a whole — files nothing links to, and overviews that fail
//! to list their area's topics.

use crate::kb::TopicFile;
use crate::models::Issue;
use crate::parser::markdown;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub fn check_link_graph(files: &[TopicFile]) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_orphans(files));
    issues.extend(check_overview_completeness(files));
    issues
}

/// Files no other file links to. Overviews and the index are entry points
/// and never count as orphans.
fn check_orphans(files: &[TopicFile]) -> Vec<Issue> {
    let mut linked: BTreeSet<PathBuf> = BTreeSet::new();
    for file in files {
        let Some(parent) = file.path.parent() else {
            continue;
        };
        for link in markdown::links(&file.content) {
            let Some(target) = link.internal_path() else {
                continue;
            };
            let resolved = parent.join(target);
            if let Ok(canonical) = resolved.canonicalize() {
                linked.insert(canonical);
            }
        }
    }

    files
        .iter()
        .filter(|f| !f.is_overview())
        .filter(|f| {
            f.path
                .canonicalize()
                .map(|c| !linked.contains(&c))
                .unwrap_or(false)
        })
        .map(|f| {
            Issue::warn(
                &f.rel_path,
                format!("Orphaned file; not linked from any other file: {}", f.rel_path),
            )
        })
        .collect()
}

/// Each overview's "How It's Organized" section must link every topic file
/// in its area. Silent when the overview lacks the section (section
/// completeness covers that).
fn check_overview_completeness(files: &[TopicFile]) -> Vec<Issue> {
    let topics_by_area = crate::cross::topics_by_area(files);

    let mut issues = Vec::new();
    for overview in files.iter().filter(|f| f.is_overview()) {
        let Some(area) = overview.area() else {
            continue;
        };
        let Some(topics) = topics_by_area.get(area) else {
            continue;
        };

        let body = overview.body();
        let Some(section) = markdown::section(&body, "How It's Organized") else {
            continue;
        };

        let linked: BTreeSet<String> = markdown::links(&section)
            .iter()
            .filter_map(|l| l.internal_path().map(str::to_string))
            .collect();

        for topic in topics {
            if !linked.contains(topic.file_name()) {
                issues.push(Issue::warn(
                    &overview.rel_path,
                    format!(
                        "Topic '{}' not listed in overview's How It's Organized section",
                        topic.file_name()
                    ),
                ));
            }
        }
    }
    issues
}
