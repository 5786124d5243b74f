//! End-to-end Tier 2 pre-screening runs.

use crate::fixtures::{stale_md, valid_md, write};
use curator::config::Settings;
use curator::kb::KnowledgeBase;
use curator::models::TriggerKind;
use curator::report;
use tempfile::TempDir;

fn run_tier2(temp: &TempDir) -> report::Tier2Report {
    let settings = Settings::default();
    let kb = KnowledgeBase::open(temp.path(), &settings).unwrap();
    let files = kb.discover().unwrap();
    report::run_tier2(&files, &settings)
}

/// A working document rich enough to stay silent on every trigger.
fn substantial_working_md() -> String {
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d");
    let why: String = (0..12)
        .map(|_| "This topic shapes real decisions and grounds daily practice across the team. ")
        .collect();
    let prose: String = (0..40)
        .map(|i| {
            format!(
                "Paragraph sentence {i} explains behavior with supporting context [ref](https://example.org/ref-{i}).\n\n"
            )
        })
        .collect();
    format!(
        "---\n\
sources:\n\
  - https://example.com/doc\n\
  - https://docs.example.org/spec\n\
last_validated: {today}\n\
relevance: core\n\
depth: working\n\
evaluation:\n\
  evaluated_by: reviewer\n\
  evaluated_on: {today}\n\
  method: spot-check\n\
---\n\
\n\
# Topic\n\
\n\
## Why This Matters\n\
\n\
{why}\n\
\n\
## In Practice\n\
\n\
Run `curator check` with a 5 second timeout; see https://example.org/how for the walkthrough.\n\
\n\
{prose}\n\
## Key Guidance\n\
\n\
- Keep thresholds explicit [a](https://example.org/a)\n\
- Measure before tuning [b](https://example.org/b)\n\
\n\
## Watch Out For\n\
\n\
- Silent truncation [c](https://example.org/c)\n\
\n\
## Go Deeper\n\
\n\
- [topic Reference](topic.ref.md)\n\
- [External](https://example.org/deeper)\n"
    )
}

#[test]
fn test_clean_file_no_triggers() {
    let temp = TempDir::new().unwrap();
    write(
        &temp.path().join("docs/area/topic.md"),
        &substantial_working_md(),
    );

    let result = run_tier2(&temp);
    assert!(
        result.queue.is_empty(),
        "expected no triggers, got: {:?}",
        result.queue
    );
    assert_eq!(result.summary.files_with_triggers, 0);
    assert_eq!(result.summary.total_files_scanned, 1);
}

#[test]
fn test_stale_file_produces_source_drift() {
    let temp = TempDir::new().unwrap();
    write(
        &temp.path().join("docs/area/old.md"),
        &stale_md("overview", 200),
    );

    let result = run_tier2(&temp);
    let drift: Vec<_> = result
        .queue
        .iter()
        .filter(|i| i.trigger == TriggerKind::SourceDrift)
        .collect();
    assert_eq!(drift.len(), 1);
    assert_eq!(drift[0].file, "docs/area/old.md");
    assert_eq!(drift[0].context["age_days"], 200);
}

#[test]
fn test_queue_item_schema_and_counts() {
    let temp = TempDir::new().unwrap();
    // Stale overview plus a thin working file: several trigger kinds fire
    write(
        &temp.path().join("docs/area/overview.md"),
        &stale_md("overview", 120),
    );
    write(
        &temp.path().join("docs/area/thin.md"),
        &valid_md("working"),
    );

    let result = run_tier2(&temp);
    assert!(!result.queue.is_empty());

    for item in &result.queue {
        assert!(!item.file.is_empty());
        assert!(!item.reason.is_empty());
        assert!(item.context.is_object());
        assert!(TriggerKind::all().contains(&item.trigger));
    }

    let mut actual: std::collections::BTreeMap<TriggerKind, usize> = Default::default();
    for item in &result.queue {
        *actual.entry(item.trigger).or_default() += 1;
    }
    assert_eq!(actual, result.summary.trigger_counts);

    let flagged: std::collections::BTreeSet<&str> =
        result.queue.iter().map(|i| i.file.as_str()).collect();
    assert_eq!(flagged.len(), result.summary.files_with_triggers);
}

#[test]
fn test_duplicate_citation_boundary() {
    let temp = TempDir::new().unwrap();
    let doc_with_citations = |count: usize| {
        let mut base = substantial_working_md();
        let mut bullets = String::new();
        for i in 0..count {
            bullets.push_str(&format!("- point {i} [s](https://example.com/dup)\n"));
        }
        base = base.replace(
            "- Keep thresholds explicit [a](https://example.org/a)\n",
            &bullets,
        );
        base
    };

    // Exactly twice in scope: never fires
    write(
        &temp.path().join("docs/area/topic.md"),
        &doc_with_citations(2),
    );
    let result = run_tier2(&temp);
    assert!(result
        .queue
        .iter()
        .all(|i| i.trigger != TriggerKind::CitationQuality));

    // Exactly three times: always fires, with the URL count in context
    write(
        &temp.path().join("docs/area/topic.md"),
        &doc_with_citations(3),
    );
    let result = run_tier2(&temp);
    let items: Vec<_> = result
        .queue
        .iter()
        .filter(|i| i.trigger == TriggerKind::CitationQuality)
        .collect();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].context["duplicate_urls"]["https://example.com/dup"],
        3
    );
}

#[test]
fn test_thin_working_file_fires_depth_accuracy() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("docs/area/thin.md"), &valid_md("working"));

    let result = run_tier2(&temp);
    assert!(result
        .queue
        .iter()
        .any(|i| i.trigger == TriggerKind::DepthAccuracy && i.file == "docs/area/thin.md"));
}
