//! Slug naming conventions for area directories and topic files.

use crate::kb::{KnowledgeBase, TopicFile, INDEX_FILE, OVERVIEW_FILE};
use crate::models::Issue;
use crate::utils::slugify;

pub fn check_naming_conventions(kb: &KnowledgeBase, files: &[TopicFile]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for area_dir in kb.area_dirs().unwrap_or_default() {
        let Some(name) = area_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let slug = slugify(name);
        if name != slug {
            issues.push(Issue::warn(
                format!("{}/{name}", kb.knowledge_dir_name()),
                format!("Area directory '{name}' doesn't follow naming conventions; expected '{slug}'"),
            ));
        }
    }

    for file in files {
        let name = file.file_name();
        if name == OVERVIEW_FILE || name == INDEX_FILE {
            continue;
        }
        let stem = file.stem();
        let slug = slugify(stem);
        if stem != slug {
            issues.push(Issue::warn(
                &file.rel_path,
                format!("Filename '{name}' doesn't follow naming conventions; expected '{slug}'"),
            ));
        }
    }

    issues
}
