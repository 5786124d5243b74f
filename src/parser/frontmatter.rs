//! Tolerant YAML frontmatter extraction for topic files.
//!
//! Topic files open with a `---`-delimited YAML header. Files are written by
//! external agents, so the parser must accept anything: a missing header, an
//! unclosed header, or invalid YAML all degrade to the all-absent
//! [`Frontmatter`] value. Downstream validators report missing fields as
//! issues; nothing in this module ever fails.

use crate::models::{Depth, Relevance};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Typed view of a topic file's frontmatter.
///
/// Every field is absent-by-default so downstream code never distinguishes
/// "no header" from "header missing field X". Tier values are kept raw so
/// validators can report invalid spellings instead of silently dropping them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    /// Declared source URLs, in document order
    pub sources: Vec<String>,
    pub last_validated: Option<String>,
    pub relevance: Option<String>,
    pub depth: Option<String>,
    /// Proposal lifecycle marker (`status: proposal` on staged files)
    pub status: Option<String>,
    pub proposed_by: Option<String>,
    pub rationale: Option<String>,
    /// Area slug a staged proposal targets
    pub target_area: Option<String>,
    /// Evaluation provenance record (who/when/how the content was assessed)
    pub evaluation: Option<BTreeMap<String, String>>,
}

impl Frontmatter {
    /// Parse the frontmatter block from raw file content. Never fails.
    pub fn parse(content: &str) -> Self {
        let Some(yaml) = extract_yaml_block(content) else {
            return Self::default();
        };
        let Ok(value) = serde_yaml::from_str::<serde_yaml::Value>(&yaml) else {
            return Self::default();
        };

        let mut fm = Self::default();
        let serde_yaml::Value::Mapping(map) = value else {
            return fm;
        };

        for (key, val) in &map {
            let Some(key) = key.as_str() else { continue };
            match key {
                "sources" => fm.sources = scalar_list(val),
                "last_validated" => fm.last_validated = scalar_string(val),
                "relevance" => fm.relevance = scalar_string(val),
                "depth" => fm.depth = scalar_string(val),
                "status" => fm.status = scalar_string(val),
                "proposed_by" => fm.proposed_by = scalar_string(val),
                "rationale" => fm.rationale = scalar_string(val),
                "target_area" => fm.target_area = scalar_string(val),
                "evaluation" => fm.evaluation = string_mapping(val),
                _ => {}
            }
        }
        fm
    }

    /// True when no header was found at all (every field absent).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Declared depth, if present and inside the closed set.
    pub fn depth(&self) -> Option<Depth> {
        self.depth.as_deref().and_then(|d| d.parse().ok())
    }

    /// Declared relevance, if present and inside the closed set.
    pub fn relevance(&self) -> Option<Relevance> {
        self.relevance.as_deref().and_then(|r| r.parse().ok())
    }

    /// `last_validated` as a date, if present and parseable (ISO `YYYY-MM-DD`).
    pub fn last_validated_date(&self) -> Option<NaiveDate> {
        self.last_validated
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

/// Extract the raw YAML between the opening and closing `---` delimiters.
///
/// Tracks the opening delimiter's indentation so an embedded `---` inside an
/// indented block scalar is not mistaken for the closing fence. Returns
/// `None` when the header is absent or never closed.
fn extract_yaml_block(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let first = lines.first()?;
    if !first.trim_start().starts_with("---") {
        return None;
    }
    let opening_indent = first.len() - first.trim_start().len();

    let mut end_idx = None;
    for (idx, line) in lines.iter().enumerate().skip(1) {
        let trimmed = line.trim_start();
        if trimmed.starts_with("---") && line.len() - trimmed.len() == opening_indent {
            end_idx = Some(idx);
            break;
        }
    }

    Some(lines[1..end_idx?].join("\n"))
}

/// Render a scalar YAML value as a string; `null`/empty become `None`.
fn scalar_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::String(s) if s.trim().is_empty() => None,
        serde_yaml::Value::String(s) => Some(s.trim().to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Collect a list of scalars, tolerating `url:`-prefixed strings and
/// `{url: ...}` mapping entries that some agents emit.
fn scalar_list(value: &serde_yaml::Value) -> Vec<String> {
    let serde_yaml::Value::Sequence(seq) = value else {
        return scalar_string(value).into_iter().collect();
    };

    let mut out = Vec::new();
    for entry in seq {
        let item = match entry {
            serde_yaml::Value::Mapping(map) => map.get("url").and_then(scalar_string),
            other => scalar_string(other),
        };
        if let Some(item) = item {
            let item = item.strip_prefix("url:").unwrap_or(&item).trim().to_string();
            if !item.is_empty() {
                out.push(item);
            }
        }
    }
    out
}

/// Flatten a YAML mapping to string keys and scalar-string values.
fn string_mapping(value: &serde_yaml::Value) -> Option<BTreeMap<String, String>> {
    let serde_yaml::Value::Mapping(map) = value else {
        return None;
    };
    let mut out = BTreeMap::new();
    for (key, val) in map {
        if let (Some(key), Some(val)) = (key.as_str(), scalar_string(val)) {
            out.insert(key.to_string(), val);
        }
    }
    Some(out)
}
