//! End-to-end recommendation-engine behavior.

use crate::fixtures::{days_ago_ts, log_entry, stale_md, valid_md, write, write_utilization_log};
use curator::config::Settings;
use curator::kb::KnowledgeBase;
use curator::models::RecommendationKind;
use curator::recommend::{generate_recommendations, RecommendationReport};
use curator::store::UtilizationStore;
use std::path::Path;
use tempfile::TempDir;

fn run(root: &Path, min_reads: u64, min_days: i64) -> RecommendationReport {
    let settings = Settings::default();
    let kb = KnowledgeBase::open(root, &settings).unwrap();
    let files = kb.discover().unwrap();
    let store = UtilizationStore::new(root);
    generate_recommendations(&files, &store, &settings, min_reads, min_days).unwrap()
}

fn reads(file: &str, count: usize, days_ago: i64) -> Vec<String> {
    (0..count)
        .map(|_| log_entry(file, &days_ago_ts(days_ago)))
        .collect()
}

#[test]
fn test_no_data_skipped() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("docs/area/overview.md"), &valid_md("overview"));

    let report = run(temp.path(), 10, 7);
    assert!(report.recommendations.is_empty());
    assert!(report.skipped.is_some());
    assert!(report.summary.is_none());
}

#[test]
fn test_thresholds_above_data_always_skip() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("docs/area/overview.md"), &valid_md("overview"));
    write_utilization_log(temp.path(), &reads("docs/area/overview.md", 5, 0));

    let report = run(temp.path(), 10, 0);
    assert!(report.skipped.unwrap().contains("5 reads"));

    let report = run(temp.path(), 0, 7);
    assert!(report.skipped.unwrap().contains("0 day(s)"));
}

#[test]
fn test_zero_thresholds_never_skip_with_data() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("docs/area/overview.md"), &valid_md("overview"));
    write_utilization_log(temp.path(), &reads("docs/area/overview.md", 1, 0));

    let report = run(temp.path(), 0, 0);
    assert!(report.skipped.is_none());
    assert!(report.summary.is_some());
}

#[test]
fn test_end_to_end_low_utilization() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write(&docs.join("area/overview.md"), &valid_md("overview"));
    write(&docs.join("area/busy.md"), &valid_md("working"));
    write(&docs.join("area/quiet.md"), &valid_md("working"));

    let mut entries = Vec::new();
    entries.extend(reads("docs/area/overview.md", 50, 1));
    entries.extend(reads("docs/area/busy.md", 40, 1));
    entries.extend(reads("docs/area/quiet.md", 2, 1));
    write_utilization_log(temp.path(), &entries);

    let report = run(temp.path(), 0, 0);
    assert!(report.skipped.is_none());

    let low: Vec<_> = report
        .recommendations
        .iter()
        .filter(|r| r.recommendation == RecommendationKind::LowUtilization)
        .collect();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].file, "docs/area/quiet.md");
    assert_eq!(low[0].data.read_count, 2);
    assert_eq!(low[0].data.overview_reads, Some(50));

    // The busy file and the overview stay unclassified
    assert_eq!(report.recommendations.len(), 1);
}

#[test]
fn test_never_referenced() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write(&docs.join("area/overview.md"), &valid_md("overview"));
    write(&docs.join("area/unread.md"), &valid_md("working"));
    write_utilization_log(temp.path(), &reads("docs/area/overview.md", 3, 0));

    let report = run(temp.path(), 0, 0);
    let unread: Vec<_> = report
        .recommendations
        .iter()
        .filter(|r| r.recommendation == RecommendationKind::NeverReferenced)
        .collect();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].file, "docs/area/unread.md");
}

#[test]
fn test_expand_depth_for_hot_overview() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write(&docs.join("area/overview.md"), &valid_md("overview"));
    write(&docs.join("area/one.md"), &valid_md("working"));
    write(&docs.join("area/two.md"), &valid_md("working"));

    let mut entries = Vec::new();
    entries.extend(reads("docs/area/overview.md", 30, 1));
    entries.extend(reads("docs/area/one.md", 5, 1));
    entries.extend(reads("docs/area/two.md", 4, 1));
    write_utilization_log(temp.path(), &entries);

    let report = run(temp.path(), 0, 0);
    let expand: Vec<_> = report
        .recommendations
        .iter()
        .filter(|r| r.recommendation == RecommendationKind::ExpandDepth)
        .collect();
    assert_eq!(expand.len(), 1);
    assert_eq!(expand[0].file, "docs/area/overview.md");
}

#[test]
fn test_priority_stale_high_use_wins_over_expand_depth() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    // Stale overview with traffic far above the median qualifies for both
    // stale_high_use and expand_depth
    write(&docs.join("area/overview.md"), &stale_md("overview", 150));
    write(&docs.join("area/one.md"), &valid_md("working"));
    write(&docs.join("area/two.md"), &valid_md("working"));

    let mut entries = Vec::new();
    entries.extend(reads("docs/area/overview.md", 100, 1));
    entries.extend(reads("docs/area/one.md", 10, 1));
    entries.extend(reads("docs/area/two.md", 10, 1));
    write_utilization_log(temp.path(), &entries);

    let report = run(temp.path(), 0, 0);
    let overview_recs: Vec<_> = report
        .recommendations
        .iter()
        .filter(|r| r.file == "docs/area/overview.md")
        .collect();
    assert_eq!(overview_recs.len(), 1);
    assert_eq!(
        overview_recs[0].recommendation,
        RecommendationKind::StaleHighUse
    );
}

#[test]
fn test_exclusivity_and_summary_invariant() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write(&docs.join("area/overview.md"), &stale_md("overview", 150));
    write(&docs.join("area/busy.md"), &valid_md("working"));
    write(&docs.join("area/quiet.md"), &valid_md("working"));
    write(&docs.join("area/unread.md"), &valid_md("working"));

    let mut entries = Vec::new();
    entries.extend(reads("docs/area/overview.md", 60, 2));
    entries.extend(reads("docs/area/busy.md", 40, 1));
    entries.extend(reads("docs/area/quiet.md", 2, 1));
    write_utilization_log(temp.path(), &entries);

    let report = run(temp.path(), 0, 0);
    let summary = report.summary.unwrap();

    // No file appears twice
    let mut seen = std::collections::BTreeSet::new();
    for rec in &report.recommendations {
        assert!(seen.insert(rec.file.clone()), "duplicate: {}", rec.file);
    }

    // Category counts add up to the recommendation count
    let total: usize = summary.by_category.values().sum();
    assert_eq!(total, report.recommendations.len());
    assert_eq!(summary.files_with_recommendations, report.recommendations.len());
    assert_eq!(summary.total_files, 4);
}

#[test]
fn test_overview_never_low_utilization() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write(&docs.join("area/overview.md"), &valid_md("overview"));
    write(&docs.join("area/busy.md"), &valid_md("working"));

    let mut entries = Vec::new();
    entries.extend(reads("docs/area/overview.md", 1, 1));
    entries.extend(reads("docs/area/busy.md", 50, 1));
    write_utilization_log(temp.path(), &entries);

    let report = run(temp.path(), 0, 0);
    assert!(report
        .recommendations
        .iter()
        .all(|r| r.recommendation != RecommendationKind::LowUtilization));
}
