//! Link validators scoped to a single file.

use crate::kb::{TopicFile, REF_SUFFIX};
use crate::models::{Depth, Issue};
use crate::parser::markdown;

/// Every relative markdown link must resolve to an existing file.
pub fn check_cross_references(file: &TopicFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    let Some(parent) = file.path.parent() else {
        return issues;
    };

    for link in markdown::links(&file.content) {
        let Some(target) = link.internal_path() else {
            continue;
        };
        if !parent.join(target).exists() {
            issues.push(Issue::warn(
                &file.rel_path,
                format!("Broken internal link: {target}"),
            ));
        }
    }

    issues
}

/// A working topic's "Go Deeper" section must link its reference companion
/// and at least one external source. Silent when the section is missing;
/// section completeness covers that.
pub fn check_go_deeper_links(file: &TopicFile) -> Vec<Issue> {
    if file.is_reference_companion() || file.frontmatter.depth() != Some(Depth::Working) {
        return Vec::new();
    }

    let body = file.body();
    let Some(section) = markdown::section(&body, "Go Deeper") else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    let ref_name = format!("{}{}", file.stem(), REF_SUFFIX);
    if !section.contains(&ref_name) {
        issues.push(Issue::warn(
            &file.rel_path,
            format!("Go Deeper section missing link to companion {ref_name}"),
        ));
    }
    if !section.contains("http://") && !section.contains("https://") {
        issues.push(Issue::warn(
            &file.rel_path,
            "Go Deeper section missing external link",
        ));
    }

    issues
}

/// A reference companion must carry a "See also" line linking back to its
/// working counterpart.
pub fn check_ref_see_also(file: &TopicFile) -> Vec<Issue> {
    if !file.is_reference_companion() {
        return Vec::new();
    }

    let body = file.body();
    let lowered = body.to_lowercase();
    if !lowered.contains("see also") {
        return vec![Issue::warn(
            &file.rel_path,
            "Reference file missing 'See also' section",
        )];
    }

    let companion = format!("{}.md", file.stem());
    if !body.contains(&companion) {
        return vec![Issue::warn(
            &file.rel_path,
            format!("See also section missing link to companion {companion}"),
        )];
    }

    Vec::new()
}
