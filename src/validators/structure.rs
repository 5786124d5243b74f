//! Document-shape validators: sections, headings, size, leftover markers.

use crate::kb::TopicFile;
use crate::models::{Depth, Issue};
use crate::parser::markdown;
use regex::Regex;

/// Working files must present concrete material before abstract guidance:
/// "In Practice" has to precede "Key Guidance".
pub fn check_section_ordering(file: &TopicFile) -> Vec<Issue> {
    if file.frontmatter.depth() != Some(Depth::Working) {
        return Vec::new();
    }

    let headings = markdown::h2_headings(&file.body());
    let in_practice = headings.iter().position(|h| h.contains("In Practice"));
    let key_guidance = headings.iter().position(|h| h.contains("Key Guidance"));

    match (in_practice, key_guidance) {
        (Some(practice), Some(guidance)) if guidance < practice => vec![Issue::warn(
            &file.rel_path,
            "'In Practice' must appear before 'Key Guidance' (concrete before abstract)",
        )],
        _ => Vec::new(),
    }
}

/// Depth-appropriate sections must be present. Reference files only need a
/// non-empty body.
pub fn check_section_completeness(file: &TopicFile) -> Vec<Issue> {
    let Some(depth) = file.frontmatter.depth() else {
        return Vec::new();
    };

    if depth == Depth::Reference {
        if file.body().trim().is_empty() {
            return vec![Issue::warn(
                &file.rel_path,
                "Reference file has no content after frontmatter",
            )];
        }
        return Vec::new();
    }

    let headings = markdown::h2_headings(&file.body());
    let lowered: Vec<String> = headings.iter().map(|h| h.to_lowercase()).collect();

    depth
        .required_sections()
        .iter()
        .filter(|section| {
            let needle = section.to_lowercase();
            !lowered.iter().any(|h| h.contains(&needle))
        })
        .map(|section| {
            Issue::warn(
                &file.rel_path,
                format!("Missing required section: {section}"),
            )
        })
        .collect()
}

/// Exactly one H1 and no skipped heading levels.
pub fn check_heading_hierarchy(file: &TopicFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    let levels = markdown::heading_levels(&file.body());

    let h1_count = levels.iter().filter(|&&l| l == 1).count();
    if h1_count == 0 {
        issues.push(Issue::warn(&file.rel_path, "No H1 heading found"));
    } else if h1_count > 1 {
        issues.push(Issue::warn(
            &file.rel_path,
            format!("Multiple H1 headings found ({h1_count}); expected exactly 1"),
        ));
    }

    for pair in levels.windows(2) {
        if pair[1] > pair[0] + 1 {
            issues.push(Issue::warn(
                &file.rel_path,
                format!("Skipped heading level: H{} to H{}", pair[0], pair[1]),
            ));
        }
    }

    issues
}

/// Line count must sit inside the declared depth's expected range.
pub fn check_size_bounds(file: &TopicFile) -> Vec<Issue> {
    let Some(depth) = file.frontmatter.depth() else {
        return Vec::new();
    };

    let line_count = file.content.lines().count();
    let (lo, hi) = depth.line_bounds();

    if line_count < lo {
        vec![Issue::warn(
            &file.rel_path,
            format!("File has {line_count} lines; expected at least {lo} for depth '{depth}'"),
        )]
    } else if line_count > hi {
        vec![Issue::warn(
            &file.rel_path,
            format!("File has {line_count} lines; expected at most {hi} for depth '{depth}'"),
        )]
    } else {
        Vec::new()
    }
}

/// Leftover template markers in the body: HTML comments and TODO-family
/// tags, counted outside fenced code blocks.
pub fn check_placeholder_markers(file: &TopicFile) -> Vec<Issue> {
    let mut issues = Vec::new();
    let body = markdown::strip_fenced_blocks(&file.body());

    let comment_count = body.matches("<!--").count();
    if comment_count > 0 {
        issues.push(Issue::warn(
            &file.rel_path,
            format!("Placeholder comment markers remain ({comment_count} found)"),
        ));
    }

    let tag = Regex::new(r"\b(TODO|TBD|FIXME)\b").expect("valid regex");
    for marker in ["TODO", "TBD", "FIXME"] {
        let count = tag
            .find_iter(&body)
            .filter(|m| m.as_str() == marker)
            .count();
        if count > 0 {
            issues.push(Issue::warn(
                &file.rel_path,
                format!("Placeholder marker {marker} remains ({count} found)"),
            ));
        }
    }

    issues
}
