//! Shared fixtures for the end-to-end tests.

use chrono::{Duration, Utc};
use std::fs;
use std::path::Path;

/// Write `text` to `path`, creating parent directories as needed.
pub fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A minimal valid topic document with complete frontmatter.
pub fn valid_md(depth: &str) -> String {
    let today = Utc::now().date_naive().format("%Y-%m-%d");
    let padding: String = (0..15).map(|i| format!("Line {i}\n")).collect();
    format!(
        "---\n\
sources:\n\
  - https://example.com/doc\n\
last_validated: {today}\n\
relevance: core\n\
depth: {depth}\n\
---\n\
\n\
# Topic\n\
\n\
{padding}"
    )
}

/// Like [`valid_md`] but with a `last_validated` date `age_days` in the past.
pub fn stale_md(depth: &str, age_days: i64) -> String {
    let stale = (Utc::now().date_naive() - Duration::days(age_days)).format("%Y-%m-%d");
    let padding: String = (0..15).map(|i| format!("Line {i}\n")).collect();
    format!(
        "---\n\
sources:\n\
  - https://example.com/doc\n\
last_validated: {stale}\n\
relevance: core\n\
depth: {depth}\n\
---\n\
\n\
# Topic\n\
\n\
{padding}"
    )
}

/// One JSONL utilization log entry.
pub fn log_entry(file: &str, timestamp: &str) -> String {
    format!(r#"{{"file":"{file}","timestamp":"{timestamp}","context":"hook"}}"#)
}

/// Write raw entries to the utilization log of a knowledge root.
pub fn write_utilization_log(knowledge_root: &Path, entries: &[String]) {
    let dir = knowledge_root.join(".curator").join("utilization");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("log.jsonl"), format!("{}\n", entries.join("\n"))).unwrap();
}

/// Timestamp string `days` in the past, in the hook's format.
pub fn days_ago_ts(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
