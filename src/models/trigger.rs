//! Tier 2 pre-screening trigger types.
//!
//! A trigger flags a file for non-deterministic review. Triggers only fire on
//! deterministically observable signals and never judge quality themselves;
//! the attached context carries the evidence the reviewer needs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of Tier 2 trigger names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Validation date missing, unparseable, or past the freshness threshold
    SourceDrift,
    /// Body shape (word count, prose ratio) inconsistent with declared depth
    DepthAccuracy,
    /// Inline citation density below threshold for a working file
    SourcePrimacy,
    /// "Why This Matters" section present but too thin to motivate anything
    WhyQuality,
    /// "In Practice" section carries no concrete artifacts
    ConcreteExamples,
    /// One URL cited three or more times across guidance sections
    CitationQuality,
    /// Every declared source sits in the low-authority tier
    SourceAuthority,
    /// Evaluation provenance record absent or missing required fields
    ProvenanceCompleteness,
    /// Over half of the guidance recommendations carry no inline citation
    RecommendationCoverage,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::SourceDrift => "source_drift",
            TriggerKind::DepthAccuracy => "depth_accuracy",
            TriggerKind::SourcePrimacy => "source_primacy",
            TriggerKind::WhyQuality => "why_quality",
            TriggerKind::ConcreteExamples => "concrete_examples",
            TriggerKind::CitationQuality => "citation_quality",
            TriggerKind::SourceAuthority => "source_authority",
            TriggerKind::ProvenanceCompleteness => "provenance_completeness",
            TriggerKind::RecommendationCoverage => "recommendation_coverage",
        }
    }

    pub fn all() -> &'static [TriggerKind] {
        &[
            TriggerKind::SourceDrift,
            TriggerKind::DepthAccuracy,
            TriggerKind::SourcePrimacy,
            TriggerKind::WhyQuality,
            TriggerKind::ConcreteExamples,
            TriggerKind::CitationQuality,
            TriggerKind::SourceAuthority,
            TriggerKind::ProvenanceCompleteness,
            TriggerKind::RecommendationCoverage,
        ]
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One queue entry produced by the Tier 2 trigger engine.
///
/// `context` is the precomputed evidence bag handed to the external reviewer;
/// its shape varies per trigger and is documented on each trigger function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerItem {
    /// Path relative to the knowledge-base root
    pub file: String,
    pub trigger: TriggerKind,
    pub reason: String,
    pub context: serde_json::Value,
}

impl TriggerItem {
    pub fn new(
        file: impl Into<String>,
        trigger: TriggerKind,
        reason: impl Into<String>,
        context: serde_json::Value,
    ) -> Self {
        Self {
            file: file.into(),
            trigger,
            reason: reason.into(),
            context,
        }
    }
}
