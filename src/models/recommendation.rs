//! Curation recommendation types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of curation actions, in strict priority order.
///
/// A file is assigned to the first category it qualifies for and never
/// appears under more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Heavily read but stale; freshen first
    StaleHighUse,
    /// Overview drawing heavy traffic; demand for deeper coverage
    ExpandDepth,
    /// Barely read next to its area overview; demote or merge
    LowUtilization,
    /// No recorded reads at all
    NeverReferenced,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::StaleHighUse => "stale_high_use",
            RecommendationKind::ExpandDepth => "expand_depth",
            RecommendationKind::LowUtilization => "low_utilization",
            RecommendationKind::NeverReferenced => "never_referenced",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supporting numbers behind a recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationData {
    pub read_count: u64,
    /// Declared depth as written in frontmatter, empty when absent
    pub depth: String,
    pub area: String,
    /// Read count of the area overview; present only for `low_utilization`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_reads: Option<u64>,
}

/// One curation recommendation for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Path relative to the knowledge-base root
    pub file: String,
    pub recommendation: RecommendationKind,
    pub reason: String,
    pub data: RecommendationData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RecommendationKind::StaleHighUse).unwrap(),
            "\"stale_high_use\""
        );
        assert_eq!(
            serde_json::to_string(&RecommendationKind::NeverReferenced).unwrap(),
            "\"never_referenced\""
        );
    }

    #[test]
    fn test_overview_reads_omitted_when_absent() {
        let data = RecommendationData {
            read_count: 3,
            depth: "working".to_string(),
            area: "area".to_string(),
            overview_reads: None,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("overview_reads").is_none());
    }
}
