//! Flesch-Kincaid readability bounds per depth.

use crate::kb::TopicFile;
use crate::models::Issue;
use crate::parser::markdown;
use regex::Regex;

/// Prose grade level must sit inside the declared depth's band. Reference
/// files are never scored; neither is anything under three sentences.
pub fn check_readability(file: &TopicFile) -> Vec<Issue> {
    let Some(depth) = file.frontmatter.depth() else {
        return Vec::new();
    };
    let Some((lo, hi)) = depth.readability_bounds() else {
        return Vec::new();
    };

    let body = markdown::strip_inline_formatting(&markdown::strip_fenced_blocks(&file.body()));
    let Some(grade) = flesch_kincaid_grade(&body) else {
        return Vec::new();
    };

    if grade < lo {
        vec![Issue::warn(
            &file.rel_path,
            format!(
                "Readability grade {grade:.1} below {lo:.0} for depth '{depth}'; may be too simplistic"
            ),
        )]
    } else if grade > hi {
        vec![Issue::warn(
            &file.rel_path,
            format!(
                "Readability grade {grade:.1} above {hi:.0} for depth '{depth}'; may be too complex"
            ),
        )]
    } else {
        Vec::new()
    }
}

/// Flesch-Kincaid grade, or `None` below three sentences.
pub fn flesch_kincaid_grade(text: &str) -> Option<f64> {
    let splitter = Regex::new(r"[.!?]+").expect("valid regex");
    let sentences: Vec<&str> = splitter
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.len() < 3 {
        return None;
    }

    let words: Vec<String> = sentences
        .iter()
        .flat_map(|s| markdown::words(s))
        .collect();
    if words.is_empty() {
        return None;
    }

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let grade = 0.39 * (words.len() as f64 / sentences.len() as f64)
        + 11.8 * (syllables as f64 / words.len() as f64)
        - 15.59;
    Some(grade)
}

/// Vowel-group syllable heuristic: strip a trailing silent 'e', count
/// contiguous `[aeiouy]+` runs, minimum one per word.
fn count_syllables(word: &str) -> usize {
    let mut w = word.to_lowercase();
    if w.len() > 2 && w.ends_with('e') {
        w.pop();
    }
    let groups = Regex::new(r"[aeiouy]+").expect("valid regex");
    groups.find_iter(&w).count().max(1)
}
