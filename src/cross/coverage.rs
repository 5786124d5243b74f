//! Structural coverage: an overview per area, a reference companion per topic.

use crate::cross::topics_by_area;
use crate::kb::{KnowledgeBase, TopicFile, OVERVIEW_FILE, REF_SUFFIX};
use crate::models::Issue;
use std::collections::BTreeSet;

pub fn check_coverage(kb: &KnowledgeBase, files: &[TopicFile]) -> Vec<Issue> {
    let mut issues = Vec::new();

    let overview_areas: BTreeSet<&str> = files
        .iter()
        .filter(|f| f.is_overview())
        .filter_map(|f| f.area())
        .collect();
    let companions: BTreeSet<(&str, &str)> = files
        .iter()
        .filter(|f| f.is_reference_companion())
        .filter_map(|f| f.area().map(|a| (a, f.stem())))
        .collect();

    // Area directories without any discovered overview.md
    for area_dir in kb.area_dirs().unwrap_or_default() {
        let Some(area) = area_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !overview_areas.contains(area) {
            issues.push(Issue::fail(
                format!("{}/{}", kb.knowledge_dir_name(), area),
                format!("Area '{area}' missing {OVERVIEW_FILE}"),
            ));
        }
    }

    // Topics without a reference companion
    for (area, topics) in topics_by_area(files) {
        for topic in topics {
            if !companions.contains(&(area, topic.stem())) {
                issues.push(Issue::warn(
                    &topic.rel_path,
                    format!(
                        "Topic '{}' missing companion {}{REF_SUFFIX}",
                        topic.file_name(),
                        topic.stem()
                    ),
                ));
            }
        }
    }

    issues
}
