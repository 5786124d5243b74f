//! Frontmatter completeness and source-URL validators.

use crate::kb::TopicFile;
use crate::models::{Depth, Issue};

const REQUIRED_FIELDS: &[&str] = &["sources", "last_validated", "relevance", "depth"];

/// Required frontmatter fields must be present; depth must be in its closed
/// set. A file with no header at all gets a single missing-frontmatter fail.
pub fn check_frontmatter(file: &TopicFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    let fm = &file.frontmatter;

    if fm.is_empty() {
        issues.push(Issue::fail(&file.rel_path, "Missing frontmatter"));
        return issues;
    }

    for field in REQUIRED_FIELDS {
        let missing = match *field {
            "sources" => fm.sources.is_empty(),
            "last_validated" => fm.last_validated.is_none(),
            "relevance" => fm.relevance.is_none(),
            "depth" => fm.depth.is_none(),
            _ => unreachable!(),
        };
        if missing {
            issues.push(Issue::fail(
                &file.rel_path,
                format!("Missing required frontmatter field: {field}"),
            ));
        }
    }

    if let Some(depth) = fm.depth.as_deref() {
        if depth.parse::<Depth>().is_err() {
            let valid: Vec<String> = Depth::all().iter().map(|d| d.to_string()).collect();
            issues.push(Issue::fail(
                &file.rel_path,
                format!("Invalid depth '{depth}'; must be one of {valid:?}"),
            ));
        }
    }

    issues
}

/// Every declared source must be a well-formed http(s) URL. Placeholder
/// comment entries are ignored.
pub fn check_source_urls(file: &TopicFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    for source in &file.frontmatter.sources {
        if source.contains("<!--") {
            continue;
        }
        if !source.starts_with("http://") && !source.starts_with("https://") {
            issues.push(Issue::fail(
                &file.rel_path,
                format!("Malformed source URL: {source}"),
            ));
        }
    }
    issues
}
