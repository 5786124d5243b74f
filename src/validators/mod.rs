//! Tier 1 deterministic validators.
//!
//! Each rule is a pure function from one topic file to a list of issues; a
//! rule finding problems returns issues, it never errors. The batch runner
//! concatenates every rule's output per file with no suppression between
//! rules, in a fixed order so two runs over an unchanged tree produce
//! identical issue sequences.

pub mod freshness;
pub mod frontmatter;
pub mod links;
pub mod readability;
pub mod regression;
pub mod sources;
pub mod structure;

use crate::config::Settings;
use crate::kb::TopicFile;
use crate::models::Issue;

/// Run every per-file validator over the discovered list, in validator order
/// within file order. The network-dependent accessibility check only runs
/// when `check_links` is set.
pub fn run_per_file(files: &[TopicFile], settings: &Settings, check_links: bool) -> Vec<Issue> {
    let mut issues = Vec::new();
    for file in files {
        issues.extend(frontmatter::check_frontmatter(file));
        issues.extend(structure::check_section_ordering(file));
        issues.extend(links::check_cross_references(file));
        issues.extend(structure::check_size_bounds(file));
        issues.extend(frontmatter::check_source_urls(file));
        issues.extend(freshness::check_freshness(file, settings.freshness_max_age_days));
        issues.extend(structure::check_section_completeness(file));
        issues.extend(structure::check_heading_hierarchy(file));
        issues.extend(links::check_go_deeper_links(file));
        issues.extend(links::check_ref_see_also(file));
        issues.extend(readability::check_readability(file));
        issues.extend(structure::check_placeholder_markers(file));
        issues.extend(sources::check_source_diversity(file));
        issues.extend(sources::check_citation_grounding(file));
        if check_links {
            issues.extend(sources::check_source_accessibility(file));
        }
    }
    issues
}
