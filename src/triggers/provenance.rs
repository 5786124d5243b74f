//! Provenance triggers: validation-date drift and evaluation records.

use crate::kb::TopicFile;
use crate::models::{Depth, TriggerItem, TriggerKind};
use chrono::{NaiveDate, Utc};
use serde_json::json;

/// Required keys of the `evaluation` frontmatter record.
const EVALUATION_FIELDS: &[&str] = &["evaluated_by", "evaluated_on", "method"];

/// Flag files whose `last_validated` is missing, unparseable, or past the
/// freshness threshold — the content may have drifted from its sources.
///
/// Context: `last_validated` (raw or null), `age_days` (null when no valid
/// date), `max_age_days`.
pub fn trigger_source_drift(file: &TopicFile, max_age_days: i64) -> Vec<TriggerItem> {
    let raw = file.frontmatter.last_validated.as_deref();
    let parsed = raw.and_then(|r| NaiveDate::parse_from_str(r, "%Y-%m-%d").ok());
    let age_days = parsed.map(|d| (Utc::now().date_naive() - d).num_days());

    let reason = match (raw, parsed, age_days) {
        (None, _, _) => "No validation date recorded; sources may have drifted".to_string(),
        (Some(raw), None, _) => format!("Unparseable validation date '{raw}'"),
        (_, _, Some(age)) if age > max_age_days => {
            format!("Last validated {age} days ago (threshold {max_age_days})")
        }
        _ => return Vec::new(),
    };

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::SourceDrift,
        reason,
        json!({
            "last_validated": raw,
            "age_days": age_days,
            "max_age_days": max_age_days,
        }),
    )]
}

/// Flag working files whose evaluation provenance record is absent or
/// missing required fields.
///
/// Context: `missing_fields` in declaration order.
pub fn trigger_provenance_completeness(file: &TopicFile) -> Vec<TriggerItem> {
    if file.frontmatter.depth() != Some(Depth::Working) || file.is_reference_companion() {
        return Vec::new();
    }

    let missing: Vec<&str> = match &file.frontmatter.evaluation {
        None => EVALUATION_FIELDS.to_vec(),
        Some(record) => EVALUATION_FIELDS
            .iter()
            .copied()
            .filter(|field| !record.contains_key(*field))
            .collect(),
    };
    if missing.is_empty() {
        return Vec::new();
    }

    let reason = if file.frontmatter.evaluation.is_none() {
        "No evaluation provenance record".to_string()
    } else {
        format!("Evaluation record missing fields: {}", missing.join(", "))
    };

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::ProvenanceCompleteness,
        reason,
        json!({ "missing_fields": missing }),
    )]
}
