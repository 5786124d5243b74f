//! Staged-proposal integrity.
//!
//! Proposals live under `_proposals/` inside the knowledge directory and are
//! excluded from normal discovery. They still need valid frontmatter, a real
//! target area, the working-depth sections, and a bounded shelf life.

use crate::config::Settings;
use crate::kb::KnowledgeBase;
use crate::models::{Depth, Issue};
use crate::parser::{markdown, Frontmatter};
use chrono::Utc;
use std::fs;

pub fn check_proposal_integrity(kb: &KnowledgeBase, settings: &Settings) -> Vec<Issue> {
    let proposals_dir = kb.proposals_dir();
    if !proposals_dir.is_dir() {
        return Vec::new();
    }

    let mut paths: Vec<_> = fs::read_dir(&proposals_dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|e| e == "md"))
                .collect()
        })
        .unwrap_or_default();
    paths.sort();

    let area_slugs: Vec<String> = kb
        .area_dirs()
        .unwrap_or_default()
        .iter()
        .filter_map(|d| d.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect();

    let mut issues = Vec::new();
    for path in paths {
        let name = format!(
            "{}/_proposals/{}",
            kb.knowledge_dir_name(),
            path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
        );
        let content = fs::read_to_string(&path).unwrap_or_default();
        let fm = Frontmatter::parse(&content);

        if fm.status.as_deref() != Some("proposal") {
            issues.push(Issue::warn(
                &name,
                "Proposal missing 'status: proposal' in frontmatter",
            ));
        }
        if fm.proposed_by.is_none() {
            issues.push(Issue::warn(&name, "Proposal missing 'proposed_by' field"));
        }
        if fm.rationale.is_none() {
            issues.push(Issue::warn(&name, "Proposal missing 'rationale' field"));
        }

        match fm.target_area.as_deref() {
            None => issues.push(Issue::warn(&name, "Proposal missing 'target_area' field")),
            Some(target) if !area_slugs.iter().any(|a| a == target) => {
                issues.push(Issue::warn(
                    &name,
                    format!("Proposal targets unknown area: {target}"),
                ));
            }
            Some(_) => {}
        }

        if let Some(validated) = fm.last_validated_date() {
            let age = (Utc::now().date_naive() - validated).num_days();
            if age > settings.proposal_max_age_days {
                issues.push(Issue::warn(
                    &name,
                    format!(
                        "Stale proposal: {age} days old (max {})",
                        settings.proposal_max_age_days
                    ),
                ));
            }
        }

        let body = markdown::body_without_frontmatter(&content);
        let headings: Vec<String> = markdown::h2_headings(&body)
            .iter()
            .map(|h| h.to_lowercase())
            .collect();
        for section in Depth::Working.required_sections() {
            let needle = section.to_lowercase();
            if !headings.iter().any(|h| h.contains(&needle)) {
                issues.push(Issue::warn(
                    &name,
                    format!("Proposal missing required section: {section}"),
                ));
            }
        }
    }

    issues
}
