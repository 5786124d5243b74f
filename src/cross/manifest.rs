//! Index and manifest synchronization.
//!
//! `index.md` is the structural table of contents inside the knowledge
//! directory; `AGENTS.md` and `CLAUDE.md` are agent-maintained manifests at
//! the knowledge root whose managed sections must mirror the on-disk layout.

use crate::cross::{managed_section, topics_by_area};
use crate::kb::{KnowledgeBase, TopicFile, INDEX_FILE};
use crate::models::Issue;
use crate::parser::markdown;
use crate::utils::slugify;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;

/// The structural index must reference every topic on disk.
pub fn check_index_sync(kb: &KnowledgeBase, files: &[TopicFile]) -> Vec<Issue> {
    let index_path = kb.knowledge_dir().join(INDEX_FILE);
    let index_rel = format!("{}/{INDEX_FILE}", kb.knowledge_dir_name());

    let Ok(index_text) = fs::read_to_string(&index_path) else {
        return vec![Issue::warn(
            index_rel,
            format!("Missing {INDEX_FILE}; the knowledge base has no table of contents"),
        )];
    };

    let mut issues = Vec::new();
    for (area, topics) in topics_by_area(files) {
        for topic in topics {
            let reference = format!("{area}/{}", topic.file_name());
            if !index_text.contains(&reference) {
                issues.push(Issue::warn(
                    &topic.rel_path,
                    format!("Topic not in {INDEX_FILE}: {reference}"),
                ));
            }
        }
    }
    issues
}

/// Agent-maintained manifests must list exactly the on-disk areas and topics.
pub fn check_manifest_sync(kb: &KnowledgeBase, files: &[TopicFile]) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_agents_manifest(kb, files));
    issues.extend(check_claude_manifest(kb, files));
    issues
}

fn check_agents_manifest(kb: &KnowledgeBase, files: &[TopicFile]) -> Vec<Issue> {
    let path = kb.root().join("AGENTS.md");
    let Ok(text) = fs::read_to_string(&path) else {
        return Vec::new();
    };
    let Some(section) = managed_section(&text) else {
        return Vec::new();
    };

    let manifest_areas = parse_agents_section(section);
    let mut issues = Vec::new();
    let on_disk = topics_by_area(files);

    for (area_slug, topics) in &on_disk {
        let matched = manifest_areas
            .keys()
            .find(|name| slugify(name.as_str()) == *area_slug || name.to_lowercase() == *area_slug);

        let Some(matched) = matched else {
            issues.push(Issue::warn(
                "AGENTS.md",
                format!("Area '{area_slug}' on disk not listed in AGENTS.md"),
            ));
            continue;
        };

        let listed_paths = &manifest_areas[matched];
        for topic in topics {
            if !listed_paths.contains(&topic.rel_path) {
                issues.push(Issue::warn(
                    &topic.rel_path,
                    format!("Topic not listed in AGENTS.md: {}", topic.rel_path),
                ));
            }
        }
    }

    // Manifest entries referencing vanished files
    for paths in manifest_areas.values() {
        for entry in paths {
            if !kb.root().join(entry).exists() {
                issues.push(Issue::warn(
                    "AGENTS.md",
                    format!("AGENTS.md references nonexistent file: {entry}"),
                ));
            }
        }
    }

    issues
}

/// Parse `### Area` headings and `[name](path)` table rows from the managed
/// section of AGENTS.md. Returns area name → listed topic paths.
fn parse_agents_section(section: &str) -> BTreeMap<String, Vec<String>> {
    let heading = Regex::new(r"^###\s+(.+)$").expect("valid regex");
    let mut areas: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in section.lines() {
        if let Some(captures) = heading.captures(line) {
            let name = captures[1].trim().to_string();
            areas.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }
        if let Some(area) = &current {
            if line.starts_with('|') {
                if let Some(link) = markdown::links(line).into_iter().next() {
                    areas
                        .entry(area.clone())
                        .or_default()
                        .push(link.target);
                }
            }
        }
    }
    areas
}

fn check_claude_manifest(kb: &KnowledgeBase, files: &[TopicFile]) -> Vec<Issue> {
    let path = kb.root().join("CLAUDE.md");
    let Ok(text) = fs::read_to_string(&path) else {
        return Vec::new();
    };
    let Some(section) = managed_section(&text) else {
        return Vec::new();
    };

    let entries = parse_claude_section(section);
    let mut issues = Vec::new();

    let listed_slugs: Vec<String> = entries
        .iter()
        .filter_map(|e| {
            e.path
                .trim_matches('/')
                .split('/')
                .nth(1)
                .map(str::to_string)
        })
        .collect();

    for &area_slug in topics_by_area(files).keys() {
        if !listed_slugs.iter().any(|s| s == area_slug) {
            issues.push(Issue::warn(
                "CLAUDE.md",
                format!("Area '{area_slug}' on disk not listed in CLAUDE.md"),
            ));
        }
    }

    for entry in &entries {
        let dir = kb.root().join(entry.path.trim_matches('/'));
        if !dir.is_dir() {
            issues.push(Issue::warn(
                "CLAUDE.md",
                format!("CLAUDE.md references nonexistent directory: {}", entry.path),
            ));
        }
        if let Some(overview) = &entry.overview {
            if !kb.root().join(overview).exists() {
                issues.push(Issue::warn(
                    "CLAUDE.md",
                    format!("CLAUDE.md references nonexistent overview: {overview}"),
                ));
            }
        }
    }

    issues
}

struct ClaudeEntry {
    path: String,
    overview: Option<String>,
}

/// Parse the `### Domain Areas` table from the managed section of CLAUDE.md.
/// Rows look like `| Area Name | `docs/area-slug/` | [overview.md](docs/area-slug/overview.md) |`.
fn parse_claude_section(section: &str) -> Vec<ClaudeEntry> {
    let mut entries = Vec::new();
    let mut in_table = false;

    for line in section.lines() {
        if line.starts_with("### ") {
            in_table = line.contains("Domain Areas");
            continue;
        }
        if !in_table || !line.starts_with('|') || line.contains("---") {
            continue;
        }

        let cells: Vec<&str> = line
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        if cells.len() < 3 || cells[0] == "Area" {
            continue;
        }

        let path = cells[1].trim_matches('`').to_string();
        let overview = markdown::links(cells[2])
            .into_iter()
            .next()
            .map(|l| l.target);
        entries.push(ClaudeEntry { path, overview });
    }
    entries
}
