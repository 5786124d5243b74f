//! Body-shape triggers: depth fit, motivation thinness, concrete examples.

use crate::kb::TopicFile;
use crate::models::{Depth, TriggerItem, TriggerKind};
use crate::parser::markdown;
use regex::Regex;
use serde_json::json;

/// Minimum share of prose lines expected in a working file's body.
const MIN_WORKING_PROSE_RATIO: f64 = 0.3;
/// Minimum words for a "Why This Matters" section to count as motivated.
const MIN_WHY_WORDS: usize = 40;

/// Flag files whose body shape contradicts the declared depth: word count
/// outside the depth's expected range, or a working file that is nearly all
/// structure and no prose.
///
/// Context: `word_count`, `expected_min`/`expected_max`, `prose_ratio`
/// (working files only).
pub fn trigger_depth_accuracy(file: &TopicFile) -> Vec<TriggerItem> {
    let Some(depth) = file.frontmatter.depth() else {
        return Vec::new();
    };

    let body = markdown::strip_fenced_blocks(&file.body());
    let word_count = markdown::word_count(&body);
    let (lo, hi) = depth.word_bounds();

    let prose_ratio = (depth == Depth::Working).then(|| {
        let lines: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return 0.0;
        }
        let prose = lines
            .iter()
            .filter(|l| {
                let t = l.trim_start();
                !t.starts_with('#')
                    && !t.starts_with("- ")
                    && !t.starts_with("* ")
                    && !t.starts_with('|')
                    && !t.starts_with('>')
            })
            .count();
        prose as f64 / lines.len() as f64
    });

    let reason = if word_count < lo {
        format!("{word_count} words is thin for depth '{depth}' (expected {lo}-{hi})")
    } else if word_count > hi {
        format!("{word_count} words overshoots depth '{depth}' (expected {lo}-{hi})")
    } else if prose_ratio.is_some_and(|r| r < MIN_WORKING_PROSE_RATIO) {
        format!(
            "Only {:.0}% prose for a working file; reads as a bare outline",
            prose_ratio.unwrap_or_default() * 100.0
        )
    } else {
        return Vec::new();
    };

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::DepthAccuracy,
        reason,
        json!({
            "word_count": word_count,
            "expected_min": lo,
            "expected_max": hi,
            "prose_ratio": prose_ratio,
        }),
    )]
}

/// Flag working files whose "Why This Matters" section exists but is too
/// thin to motivate the topic.
///
/// Context: `word_count`, `min_words`.
pub fn trigger_why_quality(file: &TopicFile) -> Vec<TriggerItem> {
    if file.frontmatter.depth() != Some(Depth::Working) || file.is_reference_companion() {
        return Vec::new();
    }

    let body = file.body();
    let Some(section) = markdown::section(&body, "Why This Matters") else {
        return Vec::new();
    };

    let word_count = markdown::word_count(&section);
    if word_count >= MIN_WHY_WORDS {
        return Vec::new();
    }

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::WhyQuality,
        format!("'Why This Matters' has only {word_count} words (expected {MIN_WHY_WORDS}+)"),
        json!({
            "word_count": word_count,
            "min_words": MIN_WHY_WORDS,
        }),
    )]
}

/// Flag working files whose "In Practice" section carries no concrete
/// artifact at all: no code fence, no inline code, no number, no URL.
///
/// Context: booleans per artifact kind.
pub fn trigger_concrete_examples(file: &TopicFile) -> Vec<TriggerItem> {
    if file.frontmatter.depth() != Some(Depth::Working) || file.is_reference_companion() {
        return Vec::new();
    }

    let body = file.body();
    let Some(section) = markdown::section(&body, "In Practice") else {
        return Vec::new();
    };

    let has_code_fence = section.contains("```");
    let has_inline_code = Regex::new(r"`[^`]+`")
        .expect("valid regex")
        .is_match(&section);
    let has_numbers = section.chars().any(|c| c.is_ascii_digit());
    let has_urls = section.contains("http://") || section.contains("https://");

    if has_code_fence || has_inline_code || has_numbers || has_urls {
        return Vec::new();
    }

    vec![TriggerItem::new(
        &file.rel_path,
        TriggerKind::ConcreteExamples,
        "'In Practice' has no code, numbers, or links; nothing concrete to verify",
        json!({
            "has_code_fence": has_code_fence,
            "has_inline_code": has_inline_code,
            "has_numbers": has_numbers,
            "has_urls": has_urls,
        }),
    )]
}
