//! Utilization-driven curation recommendations.
//!
//! Cross-references the utilization log against the discovered inventory and
//! freshness signals, classifying each file into at most one curation action
//! in strict priority order.

use crate::config::Settings;
use crate::kb::TopicFile;
use crate::models::{
    Recommendation, RecommendationData, RecommendationKind, UtilizationStats,
};
use crate::store::UtilizationStore;
use crate::validators::freshness;
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Overviews below this read count gate `low_utilization` for their area.
const LOW_UTIL_MIN_OVERVIEW_READS: u64 = 10;
/// Share of the overview's reads below which a sibling counts as unused.
const LOW_UTIL_SHARE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationSummary {
    pub total_files: usize,
    pub files_with_recommendations: usize,
    pub by_category: BTreeMap<RecommendationKind, usize>,
}

/// Output of one recommendation run: either a classification with its
/// summary, or an empty list with the reason classification was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RecommendationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl RecommendationReport {
    fn skipped(reason: String) -> Self {
        Self {
            recommendations: Vec::new(),
            summary: None,
            skipped: Some(reason),
        }
    }
}

/// Generate curation recommendations for the discovered files.
///
/// Gating: with fewer than `min_reads` total reads, or less than `min_days`
/// between the earliest and latest event, the engine declines to classify
/// and reports why. Both thresholds at zero force classification.
pub fn generate_recommendations(
    files: &[TopicFile],
    store: &UtilizationStore,
    settings: &Settings,
    min_reads: u64,
    min_days: i64,
) -> Result<RecommendationReport> {
    let utilization = store.read_utilization()?;

    let total_reads: u64 = utilization.values().map(|s| s.count).sum();
    if utilization.is_empty() || total_reads < min_reads {
        return Ok(RecommendationReport::skipped(format!(
            "Insufficient data: {total_reads} reads (need {min_reads} reads over {min_days} days)"
        )));
    }

    let day_span = observed_day_span(&utilization);
    if day_span < min_days {
        return Ok(RecommendationReport::skipped(format!(
            "Insufficient data: {total_reads} reads over {day_span} day(s) (need {min_reads} reads over {min_days} days)"
        )));
    }

    // Per-file read counts over the one discovered inventory; unread files
    // count as zero everywhere below, including the median.
    let read_counts: BTreeMap<&str, u64> = files
        .iter()
        .map(|f| {
            (
                f.rel_path.as_str(),
                utilization.get(&f.rel_path).map_or(0, |s| s.count),
            )
        })
        .collect();
    let median = median_reads(read_counts.values().copied().collect());

    let by_path: BTreeMap<&str, &TopicFile> =
        files.iter().map(|f| (f.rel_path.as_str(), f)).collect();

    let mut overview_reads_by_area: BTreeMap<&str, u64> = BTreeMap::new();
    for file in files {
        if file.is_overview() {
            if let Some(area) = file.area() {
                overview_reads_by_area.insert(area, read_counts[file.rel_path.as_str()]);
            }
        }
    }

    let stale: BTreeSet<&str> = files
        .iter()
        .filter(|f| read_counts[f.rel_path.as_str()] as f64 > median)
        .filter(|f| freshness::is_stale(f, settings.freshness_max_age_days))
        .map(|f| f.rel_path.as_str())
        .collect();

    let mut recommendations = Vec::new();
    let mut classified: BTreeSet<&str> = BTreeSet::new();

    let data_for = |file: &TopicFile| RecommendationData {
        read_count: read_counts[file.rel_path.as_str()],
        depth: file.frontmatter.depth.clone().unwrap_or_default(),
        area: file.area().unwrap_or_default().to_string(),
        overview_reads: None,
    };

    // Priority 1 — heavily used stale content is the worst state
    for (&rel, &file) in &by_path {
        if stale.contains(rel) {
            recommendations.push(Recommendation {
                file: rel.to_string(),
                recommendation: RecommendationKind::StaleHighUse,
                reason: format!(
                    "Read {} times but content is stale; prioritize freshening",
                    read_counts[rel]
                ),
                data: data_for(file),
            });
            classified.insert(rel);
        }
    }

    // Priority 2 — heavy traffic into a shallow file signals unmet demand
    for (&rel, &file) in &by_path {
        if classified.contains(rel) || file.frontmatter.depth.as_deref() != Some("overview") {
            continue;
        }
        let reads = read_counts[rel];
        if median > 0.0 && reads as f64 > 2.0 * median {
            recommendations.push(Recommendation {
                file: rel.to_string(),
                recommendation: RecommendationKind::ExpandDepth,
                reason: format!(
                    "Read {reads} times but only overview depth; consider adding a working-knowledge file"
                ),
                data: data_for(file),
            });
            classified.insert(rel);
        }
    }

    // Priority 3 — barely read next to a well-used area overview
    for (&rel, &file) in &by_path {
        if classified.contains(rel) || file.is_overview() {
            continue;
        }
        let Some(area) = file.area() else { continue };
        let Some(&overview_reads) = overview_reads_by_area.get(area) else {
            continue;
        };
        if overview_reads < LOW_UTIL_MIN_OVERVIEW_READS {
            continue;
        }
        let reads = read_counts[rel];
        if (reads as f64) < overview_reads as f64 * LOW_UTIL_SHARE {
            let mut data = data_for(file);
            data.overview_reads = Some(overview_reads);
            recommendations.push(Recommendation {
                file: rel.to_string(),
                recommendation: RecommendationKind::LowUtilization,
                reason: format!(
                    "Read {reads} times vs {overview_reads} for the {area} overview; consider demoting or merging"
                ),
                data,
            });
            classified.insert(rel);
        }
    }

    // Priority 4 — anything left that was never read at all
    for (&rel, &file) in &by_path {
        if classified.contains(rel) || read_counts[rel] != 0 {
            continue;
        }
        recommendations.push(Recommendation {
            file: rel.to_string(),
            recommendation: RecommendationKind::NeverReferenced,
            reason: "No reads recorded; review relevance or discoverability".to_string(),
            data: data_for(file),
        });
        classified.insert(rel);
    }

    let mut by_category: BTreeMap<RecommendationKind, usize> = BTreeMap::new();
    for rec in &recommendations {
        *by_category.entry(rec.recommendation).or_default() += 1;
    }

    Ok(RecommendationReport {
        summary: Some(RecommendationSummary {
            total_files: files.len(),
            files_with_recommendations: recommendations.len(),
            by_category,
        }),
        recommendations,
        skipped: None,
    })
}

/// Days between the earliest and latest recorded timestamps; unparseable
/// extremes degrade to zero.
fn observed_day_span(utilization: &BTreeMap<String, UtilizationStats>) -> i64 {
    let mut earliest: Option<&str> = None;
    let mut latest: Option<&str> = None;
    for stats in utilization.values() {
        if earliest.is_none_or(|e| stats.first_referenced.as_str() < e) {
            earliest = Some(&stats.first_referenced);
        }
        if latest.is_none_or(|l| stats.last_referenced.as_str() > l) {
            latest = Some(&stats.last_referenced);
        }
    }
    match (earliest.and_then(parse_timestamp), latest.and_then(parse_timestamp)) {
        (Some(earliest), Some(latest)) => (latest - earliest).num_days(),
        _ => 0,
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Median with the standard middle-element / average-of-two rules.
fn median_reads(mut counts: Vec<u64>) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    counts.sort_unstable();
    let mid = counts.len() / 2;
    if counts.len() % 2 == 0 {
        (counts[mid - 1] + counts[mid]) as f64 / 2.0
    } else {
        counts[mid] as f64
    }
}
