//! Citation triggers: density, duplication, authority, coverage.

use crate::kb::TopicFile;
use crate::models::{Depth, TriggerItem, TriggerKind};
use crate::parser::markdown;
use crate::utils::url_host;
use serde_json::json;
use std::collections::BTreeMap;

/// Minimum inline citations per 1,000 body words for a working file.
const MIN_CITATIONS_PER_1K_WORDS: f64 = 2.0;
/// Bodies below this word count are too small for a meaningful density.
const MIN_WORDS_FOR_DENSITY: usize = 200;
/// A URL reused this many times across guidance sections is shallow sourcing.
const DUPLICATE_URL_THRESHOLD: usize = 3;

/// Hosts that never count as authoritative on their own.
const LOW_AUTHORITY_HOSTS: &[&str] = &[
    "medium.com",
    "dev.to",
    "reddit.com",
    "news.ycombinator.com",
    "quora.com",
    "substack.com",
    "blogspot.com",
    "wordpress.com",
    "hackernoon.com",
    "tumblr.com",
];

/// Flag working files whose inline citation density falls below threshold.
///
/// Context: `inline_citations`, `word_count`, `citations_per_1000_words`,
/// `min_citations_per_1000_words`.
pub fn trigger_source_primacy(file: &TopicFile) -> Vec<TriggerItem> {
    if file.frontmatter.depth() != Some(Depth::Working) || file.is_reference_companion() {
        return Vec::new();
    }

    let body = markdown::strip_fenced_blocks(&file.body());
    let word_count = markdown::word_count(&body);
    if word_count < MIN_WORDS_FOR_DENSITY {
        return Vec::new();
    }

    let citations = markdown::citation_urls(&body).len();
    let density = citations as f64 * 1000.0 / word_count as f64;
    if density >= MIN_CITATIONS_PER_1K_WORDS {
        return Vec::new();
    }

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::SourcePrimacy,
        format!(
            "{citations} inline citations over {word_count} words ({density:.1}/1k, threshold {MIN_CITATIONS_PER_1K_WORDS:.1}/1k)"
        ),
        json!({
            "inline_citations": citations,
            "word_count": word_count,
            "citations_per_1000_words": density,
            "min_citations_per_1000_words": MIN_CITATIONS_PER_1K_WORDS,
        }),
    )]
}

/// Flag working files that lean on one URL three-plus times across the
/// "Key Guidance" and "Watch Out For" sections.
///
/// Context: `duplicate_urls` (URL → count), `total_citations`,
/// `unique_citations`.
pub fn trigger_citation_quality(file: &TopicFile) -> Vec<TriggerItem> {
    if file.frontmatter.depth() != Some(Depth::Working) || file.is_reference_companion() {
        return Vec::new();
    }

    let body = file.body();
    let mut urls = Vec::new();
    for heading in ["Key Guidance", "Watch Out For"] {
        if let Some(section) = markdown::section(&body, heading) {
            urls.extend(markdown::citation_urls(&section));
        }
    }
    if urls.is_empty() {
        return Vec::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for url in &urls {
        *counts.entry(url.as_str()).or_default() += 1;
    }

    let duplicates: BTreeMap<&str, usize> = counts
        .iter()
        .filter(|&(_, &count)| count >= DUPLICATE_URL_THRESHOLD)
        .map(|(&url, &count)| (url, count))
        .collect();
    if duplicates.is_empty() {
        return Vec::new();
    }

    let worst = duplicates
        .iter()
        .max_by_key(|&(_, &count)| count)
        .map(|(&url, &count)| format!("{url} cited {count} times"))
        .unwrap_or_default();

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::CitationQuality,
        format!("Repeated citation in guidance sections: {worst}"),
        json!({
            "duplicate_urls": duplicates,
            "total_citations": urls.len(),
            "unique_citations": counts.len(),
        }),
    )]
}

/// Flag files whose declared sources all sit in the low-authority tier.
///
/// Context: `source_tiers` (URL → tier).
pub fn trigger_source_authority(file: &TopicFile) -> Vec<TriggerItem> {
    let sources: Vec<&String> = file
        .frontmatter
        .sources
        .iter()
        .filter(|s| !s.contains("<!--"))
        .collect();
    if sources.is_empty() {
        return Vec::new();
    }

    let tiers: BTreeMap<&str, &str> = sources
        .iter()
        .map(|s| (s.as_str(), authority_tier(s)))
        .collect();
    if tiers.values().any(|&tier| tier != "low") {
        return Vec::new();
    }

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::SourceAuthority,
        format!("All {} sources are low-authority hosts", sources.len()),
        json!({ "source_tiers": tiers }),
    )]
}

fn authority_tier(url: &str) -> &'static str {
    let Some(host) = url_host(url) else {
        return "low";
    };
    let is_low = LOW_AUTHORITY_HOSTS
        .iter()
        .any(|low| host == *low || host.ends_with(&format!(".{low}")))
        || host.starts_with("blog.");
    if is_low {
        "low"
    } else {
        "standard"
    }
}

/// Flag working files where more than half of the "Key Guidance" bullets
/// carry no inline citation.
///
/// Context: `total_recommendations`, `uncited_recommendations`,
/// `uncited_ratio`.
pub fn trigger_recommendation_coverage(file: &TopicFile) -> Vec<TriggerItem> {
    if file.frontmatter.depth() != Some(Depth::Working) || file.is_reference_companion() {
        return Vec::new();
    }

    let body = file.body();
    let Some(section) = markdown::section(&body, "Key Guidance") else {
        return Vec::new();
    };

    let bullets = markdown::bullets(&section);
    if bullets.is_empty() {
        return Vec::new();
    }

    let uncited = bullets
        .iter()
        .filter(|b| markdown::citation_urls(b).is_empty())
        .count();
    let ratio = uncited as f64 / bullets.len() as f64;
    if ratio <= 0.5 {
        return Vec::new();
    }

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::RecommendationCoverage,
        format!(
            "{uncited} of {} guidance recommendations lack any inline citation",
            bullets.len()
        ),
        json!({
            "total_recommendations": bullets.len(),
            "uncited_recommendations": uncited,
            "uncited_ratio": ratio,
        }),
    )]
}
