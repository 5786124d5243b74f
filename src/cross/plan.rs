//! Curation-plan synchronization.
//!
//! The curation plan is a checklist at `.curator/curation-plan.md` with one
//! `## <area>` heading per area and one checkbox per planned topic. Checked
//! items must exist on disk, existing files must be checked off, and topics
//! on disk must appear in the plan.

use crate::cross::topics_by_area;
use crate::kb::{KnowledgeBase, TopicFile};
use crate::models::Issue;
use crate::utils::slugify;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;

pub const PLAN_FILE: &str = ".curator/curation-plan.md";

#[derive(Debug, PartialEq)]
struct PlanItem {
    area: String,
    name: String,
    checked: bool,
}

pub fn check_curation_plan_sync(kb: &KnowledgeBase, files: &[TopicFile]) -> Vec<Issue> {
    let plan_path = kb.root().join(PLAN_FILE);
    let Ok(plan_text) = fs::read_to_string(&plan_path) else {
        return Vec::new();
    };

    let items = parse_plan(&plan_text);
    if items.is_empty() {
        return Vec::new();
    }

    let mut issues = Vec::new();
    let mut planned: BTreeSet<String> = BTreeSet::new();

    for item in &items {
        let slug = slugify(&item.name);
        let rel = format!("{}/{slug}.md", item.area);
        planned.insert(rel.clone());

        let exists = kb.knowledge_dir().join(&item.area).join(format!("{slug}.md")).exists();
        if item.checked && !exists {
            issues.push(Issue::warn(
                PLAN_FILE,
                format!("Plan item '{}' is checked but file not found: {rel}", item.name),
            ));
        } else if !item.checked && exists {
            issues.push(Issue::warn(
                PLAN_FILE,
                format!("Plan item '{}' should be checked off; file exists: {rel}", item.name),
            ));
        }
    }

    for (area, topics) in topics_by_area(files) {
        for topic in topics {
            let rel = format!("{area}/{}", topic.file_name());
            if !planned.contains(&rel) {
                issues.push(Issue::warn(
                    &topic.rel_path,
                    format!("Topic on disk not in curation plan: {rel}"),
                ));
            }
        }
    }

    issues
}

/// Parse `## area` headings and `- [x] Name -- note` checkbox lines.
fn parse_plan(text: &str) -> Vec<PlanItem> {
    let heading = Regex::new(r"^##\s+(.+)$").expect("valid regex");
    let checkbox = Regex::new(r"^-\s+\[([ xX])\]\s+(.+?)(?:\s+--\s+.*)?$").expect("valid regex");

    let mut items = Vec::new();
    let mut current_area: Option<String> = None;

    for line in text.lines() {
        if let Some(captures) = heading.captures(line) {
            current_area = Some(captures[1].trim().to_string());
            continue;
        }
        let Some(area) = &current_area else { continue };
        if let Some(captures) = checkbox.captures(line) {
            items.push(PlanItem {
                area: area.clone(),
                name: captures[2].trim().to_string(),
                checked: captures[1].to_lowercase() == "x",
            });
        }
    }
    items
}
