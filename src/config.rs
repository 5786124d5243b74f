//! Engine settings, read once per invocation from `.curator/config.toml`
//! inside the knowledge-base root. Every field falls back to a documented
//! default when the file or the field is absent.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_KNOWLEDGE_DIR: &str = "docs";
pub const DEFAULT_FRESHNESS_MAX_AGE_DAYS: i64 = 90;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.4;
pub const DEFAULT_PROPOSAL_MAX_AGE_DAYS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory under the knowledge root holding topic files
    pub knowledge_dir: String,
    /// Age in days after which `last_validated` is considered stale
    pub freshness_max_age_days: i64,
    /// Jaccard similarity above which two files count as duplicates
    pub similarity_threshold: f64,
    /// Age in days after which a staged proposal is considered stale
    pub proposal_max_age_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            knowledge_dir: DEFAULT_KNOWLEDGE_DIR.to_string(),
            freshness_max_age_days: DEFAULT_FRESHNESS_MAX_AGE_DAYS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            proposal_max_age_days: DEFAULT_PROPOSAL_MAX_AGE_DAYS,
        }
    }
}

impl Settings {
    /// Load settings for a knowledge-base root. A missing config file yields
    /// the defaults; an unparseable one is an error the caller reports once.
    pub fn load(knowledge_root: &Path) -> Result<Self> {
        let path = knowledge_root.join(".curator").join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
