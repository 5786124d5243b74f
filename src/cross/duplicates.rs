//! Duplicate-content detection.
//!
//! Two passes over every non-companion pair: exact paragraph duplicates via
//! content hashes, then token-shingle Jaccard similarity against a
//! configurable threshold. A working topic and its reference companion
//! overlap by design and are exempt from both passes.

use crate::kb::TopicFile;
use crate::models::Issue;
use crate::parser::markdown;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashSet};

const SHINGLE_SIZE: usize = 5;

pub fn check_duplicate_content(files: &[TopicFile], similarity_threshold: f64) -> Vec<Issue> {
    if files.len() < 2 {
        return Vec::new();
    }

    struct FileData<'a> {
        file: &'a TopicFile,
        paragraph_hashes: Vec<String>,
        shingles: HashSet<String>,
    }

    let data: Vec<FileData> = files
        .iter()
        .map(|file| {
            let body = markdown::strip_fenced_blocks(&file.body());
            FileData {
                file,
                paragraph_hashes: markdown::paragraphs(&body)
                    .iter()
                    .map(|p| hex::encode(Sha256::digest(p.as_bytes())))
                    .collect(),
                shingles: markdown::word_shingles(&body, SHINGLE_SIZE),
            }
        })
        .collect();

    let mut issues = Vec::new();

    // Pass 1 — exact paragraph duplicates
    let mut paragraph_owners: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, entry) in data.iter().enumerate() {
        for hash in &entry.paragraph_hashes {
            paragraph_owners.entry(hash).or_default().push(idx);
        }
    }

    let mut reported: BTreeSet<(usize, usize)> = BTreeSet::new();
    for owners in paragraph_owners.values() {
        let unique: BTreeSet<usize> = owners.iter().copied().collect();
        let unique: Vec<usize> = unique.into_iter().collect();
        for i in 0..unique.len() {
            for j in i + 1..unique.len() {
                let pair = (unique[i], unique[j]);
                if reported.contains(&pair) || is_companion_pair(data[pair.0].file, data[pair.1].file)
                {
                    continue;
                }
                reported.insert(pair);
                issues.push(Issue::warn(
                    &data[pair.0].file.rel_path,
                    format!(
                        "Exact duplicate paragraph found in {} and {}",
                        data[pair.0].file.rel_path, data[pair.1].file.rel_path
                    ),
                ));
            }
        }
    }

    // Pass 2 — token-shingle similarity
    for i in 0..data.len() {
        for j in i + 1..data.len() {
            if is_companion_pair(data[i].file, data[j].file) {
                continue;
            }
            let (a, b) = (&data[i].shingles, &data[j].shingles);
            if a.is_empty() || b.is_empty() {
                continue;
            }
            let similarity = jaccard(a, b);
            if similarity > similarity_threshold {
                issues.push(Issue::warn(
                    &data[i].file.rel_path,
                    format!(
                        "High similarity ({:.0}%) between {} and {}; consider deduplicating",
                        similarity * 100.0,
                        data[i].file.rel_path,
                        data[j].file.rel_path
                    ),
                ));
            }
        }
    }

    issues
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// A working topic and its `.ref.md` companion in the same directory.
fn is_companion_pair(a: &TopicFile, b: &TopicFile) -> bool {
    if a.path.parent() != b.path.parent() {
        return false;
    }
    (a.is_reference_companion() != b.is_reference_companion()) && a.stem() == b.stem()
}
