//! Inventory-regression behavior across consecutive check runs.

use crate::fixtures::{valid_md, write};
use curator::commands::check;
use curator::config::Settings;
use curator::kb::KnowledgeBase;
use curator::report;
use curator::store::HistoryStore;
use std::fs;
use tempfile::TempDir;

fn seed(temp: &TempDir, names: &[&str]) {
    write(
        &temp.path().join("docs/area/overview.md"),
        &valid_md("overview"),
    );
    for name in names {
        write(
            &temp.path().join(format!("docs/area/{name}")),
            &valid_md("working"),
        );
    }
}

fn tier1_issues(temp: &TempDir) -> Vec<curator::models::Issue> {
    let settings = Settings::default();
    let kb = KnowledgeBase::open(temp.path(), &settings).unwrap();
    let files = kb.discover().unwrap();
    let history = HistoryStore::new(kb.root());
    report::run_tier1(&kb, &files, &settings, false, &history)
        .unwrap()
        .issues
}

#[test]
fn test_first_run_produces_no_regression_issues() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &["a.md", "b.md"]);

    let issues = tier1_issues(&temp);
    assert!(issues.iter().all(|i| !i.message.contains("now missing")));
}

#[test]
fn test_removed_file_warned_exactly_once() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &["a.md", "b.md", "c.md"]);
    check::execute(temp.path(), false, false, false).unwrap();

    fs::remove_file(temp.path().join("docs/area/c.md")).unwrap();
    let issues = tier1_issues(&temp);

    let regressions: Vec<_> = issues
        .iter()
        .filter(|i| i.message.contains("now missing"))
        .collect();
    assert_eq!(regressions.len(), 1);
    assert_eq!(regressions[0].file, "docs/area/c.md");
}

#[test]
fn test_added_files_never_warn() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &["a.md", "b.md"]);
    check::execute(temp.path(), false, false, false).unwrap();

    seed(&temp, &["c.md", "d.md"]);
    let issues = tier1_issues(&temp);
    assert!(issues.iter().all(|i| !i.message.contains("now missing")));
}

#[test]
fn test_regression_reads_snapshot_before_append() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &["a.md", "b.md"]);
    check::execute(temp.path(), false, false, false).unwrap();

    // Remove a file, then run the full command; the run must compare
    // against the pre-existing snapshot, not the one it appends itself.
    fs::remove_file(temp.path().join("docs/area/b.md")).unwrap();
    let code = check::execute(temp.path(), false, false, false).unwrap();
    assert_eq!(code, 0, "regression findings are warnings");

    let history = HistoryStore::new(temp.path());
    let snapshots = history.read_history(10).unwrap();
    assert_eq!(snapshots.len(), 2);
    let latest = &snapshots[1];
    assert!(latest
        .tier1
        .as_ref()
        .is_some_and(|t| t.warn_count > 0));
    assert_eq!(
        latest.file_list,
        vec![
            "docs/area/a.md".to_string(),
            "docs/area/overview.md".to_string()
        ]
    );

    // A third run compares against the post-removal snapshot: no warning
    let issues = tier1_issues(&temp);
    assert!(issues.iter().all(|i| !i.message.contains("now missing")));
}
