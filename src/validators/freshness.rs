//! Validation-date freshness.

use crate::kb::TopicFile;
use crate::models::Issue;
use chrono::{NaiveDate, Utc};

/// Warn when `last_validated` is absent, unparseable, or older than
/// `max_age_days`.
pub fn check_freshness(file: &TopicFile, max_age_days: i64) -> Vec<Issue> {
    match staleness(file, max_age_days) {
        Staleness::Fresh => Vec::new(),
        Staleness::Missing => vec![Issue::warn(
            &file.rel_path,
            "No last_validated date; content has never been validated",
        )],
        Staleness::Invalid(raw) => vec![Issue::warn(
            &file.rel_path,
            format!("Invalid last_validated date: {raw}"),
        )],
        Staleness::Expired(age) => vec![Issue::warn(
            &file.rel_path,
            format!("Content is {age} days old (max {max_age_days}); needs re-validation"),
        )],
    }
}

/// Whether the freshness validator would flag this file. The recommendation
/// engine keys `stale_high_use` off this.
pub fn is_stale(file: &TopicFile, max_age_days: i64) -> bool {
    !matches!(staleness(file, max_age_days), Staleness::Fresh)
}

enum Staleness {
    Fresh,
    Missing,
    Invalid(String),
    Expired(i64),
}

fn staleness(file: &TopicFile, max_age_days: i64) -> Staleness {
    let Some(raw) = file.frontmatter.last_validated.as_deref() else {
        return Staleness::Missing;
    };
    let Ok(validated) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        return Staleness::Invalid(raw.to_string());
    };
    let age = (Utc::now().date_naive() - validated).num_days();
    if age > max_age_days {
        Staleness::Expired(age)
    } else {
        Staleness::Fresh
    }
}
