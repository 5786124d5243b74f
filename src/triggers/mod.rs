//! Tier 2 pre-screening triggers.
//!
//! Each trigger is a pure function from one topic file to trigger items. A
//! trigger decides "this file needs non-deterministic review" from signals
//! that are deterministically observable — it never judges quality itself.
//! The batch runner applies every trigger to every discovered file; no
//! priority exists among triggers at this stage.

pub mod citations;
pub mod provenance;
pub mod shape;

use crate::config::Settings;
use crate::kb::TopicFile;
use crate::models::TriggerItem;

/// Apply all nine triggers to every file, in trigger order within file
/// order, accumulating the flat review queue.
pub fn run_batch(files: &[TopicFile], settings: &Settings) -> Vec<TriggerItem> {
    let mut queue = Vec::new();
    for file in files {
        queue.extend(provenance::trigger_source_drift(
            file,
            settings.freshness_max_age_days,
        ));
        queue.extend(shape::trigger_depth_accuracy(file));
        queue.extend(citations::trigger_source_primacy(file));
        queue.extend(shape::trigger_why_quality(file));
        queue.extend(shape::trigger_concrete_examples(file));
        queue.extend(citations::trigger_citation_quality(file));
        queue.extend(citations::trigger_source_authority(file));
        queue.extend(provenance::trigger_provenance_completeness(file));
        queue.extend(citations::trigger_recommendation_coverage(file));
    }
    queue
}
