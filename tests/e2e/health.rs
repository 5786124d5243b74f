//! End-to-end Tier 1 runs through the check command.

use crate::fixtures::{stale_md, valid_md, write};
use curator::commands::check;
use curator::config::Settings;
use curator::kb::KnowledgeBase;
use curator::models::Severity;
use curator::report;
use curator::store::HistoryStore;
use tempfile::TempDir;

fn clean_kb(temp: &TempDir) {
    let docs = temp.path().join("docs");
    write(&docs.join("area-one/overview.md"), &valid_md("overview"));
    write(&docs.join("area-one/topic.md"), &valid_md("working"));
    write(&docs.join("area-one/topic.ref.md"), &valid_md("reference"));
}

#[test]
fn test_clean_kb_has_no_failures_and_exits_zero() {
    let temp = TempDir::new().unwrap();
    clean_kb(&temp);

    let code = check::execute(temp.path(), false, false, false).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn test_missing_frontmatter_fails_and_exits_one() {
    let temp = TempDir::new().unwrap();
    clean_kb(&temp);
    write(&temp.path().join("docs/area-one/broken.md"), "# No header\n");

    let code = check::execute(temp.path(), false, false, false).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn test_warnings_alone_exit_zero() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    // Stale but structurally complete: freshness warns, nothing fails
    write(&docs.join("area-one/overview.md"), &stale_md("overview", 120));
    write(&docs.join("area-one/topic.md"), &stale_md("working", 120));
    write(&docs.join("area-one/topic.ref.md"), &stale_md("reference", 120));

    let code = check::execute(temp.path(), false, false, false).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn test_missing_knowledge_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    assert!(check::execute(&missing, false, false, false).is_err());
}

#[test]
fn test_empty_kb_distinguishable_from_missing() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("docs")).unwrap();

    // Present-but-empty knowledge base runs fine with zero files
    let code = check::execute(temp.path(), false, false, false).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn test_each_invocation_appends_one_snapshot() {
    let temp = TempDir::new().unwrap();
    clean_kb(&temp);

    check::execute(temp.path(), false, false, false).unwrap();
    check::execute(temp.path(), true, false, false).unwrap();
    check::execute(temp.path(), false, true, false).unwrap();

    let history = HistoryStore::new(temp.path());
    let snapshots = history.read_history(10).unwrap();
    assert_eq!(snapshots.len(), 3);

    // Tier 1 only
    assert!(snapshots[0].tier1.is_some());
    assert!(snapshots[0].tier2.is_none());
    // Tier 2 only
    assert!(snapshots[1].tier1.is_none());
    assert!(snapshots[1].tier2.is_some());
    // Both
    assert!(snapshots[2].tier1.is_some());
    assert!(snapshots[2].tier2.is_some());

    // Every snapshot carries the full discovered list
    for snapshot in &snapshots {
        assert_eq!(snapshot.file_list.len(), 3);
        assert!(snapshot
            .file_list
            .contains(&"docs/area-one/topic.md".to_string()));
    }
}

#[test]
fn test_tier1_determinism_across_runs() {
    let temp = TempDir::new().unwrap();
    clean_kb(&temp);
    // Add some issues so the sequences are non-trivial
    write(&temp.path().join("docs/area-one/stray.md"), "# No header\n");

    let settings = Settings::default();
    let kb = KnowledgeBase::open(temp.path(), &settings).unwrap();
    let files = kb.discover().unwrap();
    let history = HistoryStore::new(kb.root());

    let first = report::run_tier1(&kb, &files, &settings, false, &history).unwrap();
    let second = report::run_tier1(&kb, &files, &settings, false, &history).unwrap();
    assert_eq!(first.issues, second.issues);
}

#[test]
fn test_severity_partition() {
    let temp = TempDir::new().unwrap();
    clean_kb(&temp);
    write(&temp.path().join("docs/area-one/bad.md"), "# No header\nTODO\n");

    let settings = Settings::default();
    let kb = KnowledgeBase::open(temp.path(), &settings).unwrap();
    let files = kb.discover().unwrap();
    let history = HistoryStore::new(kb.root());

    let result = report::run_tier1(&kb, &files, &settings, false, &history).unwrap();
    assert!(!result.issues.is_empty());
    for issue in &result.issues {
        assert!(matches!(issue.severity, Severity::Fail | Severity::Warn));
    }
    let fails = result
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Fail)
        .count();
    let warns = result
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Warn)
        .count();
    assert_eq!(fails, result.summary.fail_count);
    assert_eq!(warns, result.summary.warn_count);
}

#[test]
fn test_companion_exemption_in_duplicates() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    let shared =
        "This paragraph is long enough to register and appears in both companion documents verbatim, word for word and line for line.";
    write(
        &docs.join("area-one/overview.md"),
        "---\nsources:\n  - https://example.com/doc\nlast_validated: 2099-01-01\nrelevance: core\ndepth: overview\n---\n# Area\n\nCompletely separate prose describing what this area covers and how its topics hang together.\n",
    );
    write(
        &docs.join("area-one/topic.md"),
        &format!("---\nsources:\n  - https://example.com/doc\nlast_validated: 2099-01-01\nrelevance: core\ndepth: working\n---\n# Topic\n\n{shared}\n\n{shared}\n"),
    );
    write(
        &docs.join("area-one/topic.ref.md"),
        &format!("---\nsources:\n  - https://example.com/doc\nlast_validated: 2099-01-01\nrelevance: core\ndepth: reference\n---\n# Topic Reference\n\n{shared}\n\n{shared}\n"),
    );

    let settings = Settings::default();
    let kb = KnowledgeBase::open(temp.path(), &settings).unwrap();
    let files = kb.discover().unwrap();
    let history = HistoryStore::new(kb.root());

    let result = report::run_tier1(&kb, &files, &settings, false, &history).unwrap();
    assert!(
        !result
            .issues
            .iter()
            .any(|i| i.message.contains("duplicate") || i.message.contains("similarity")),
        "companion overlap must not trigger duplicate detection: {:?}",
        result.issues
    );
}
