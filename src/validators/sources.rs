//! Source-quality validators: diversity, citation grounding, and the opt-in
//! network accessibility check.

use crate::kb::TopicFile;
use crate::models::{Depth, Issue};
use crate::parser::markdown;
use crate::utils::url_host;
use std::collections::BTreeSet;
use std::time::Duration;

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 3;
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Two-plus sources all pointing at one host defeat the point of citing
/// multiple sources.
pub fn check_source_diversity(file: &TopicFile) -> Vec<Issue> {
    let sources: Vec<&String> = file
        .frontmatter
        .sources
        .iter()
        .filter(|s| !s.contains("<!--"))
        .collect();
    if sources.len() < 2 {
        return Vec::new();
    }

    let hosts: BTreeSet<&str> = sources.iter().filter_map(|s| url_host(s)).collect();
    if hosts.len() == 1 {
        let host = hosts.iter().next().expect("non-empty host set");
        return vec![Issue::warn(
            &file.rel_path,
            format!(
                "All {} sources share a single host: {host}",
                sources.len()
            ),
        )];
    }
    Vec::new()
}

/// Working files must ground their guidance with at least one inline
/// citation somewhere in the body.
pub fn check_citation_grounding(file: &TopicFile) -> Vec<Issue> {
    if file.frontmatter.depth() != Some(Depth::Working) || file.is_reference_companion() {
        return Vec::new();
    }

    let body = markdown::strip_fenced_blocks(&file.body());
    if markdown::citation_urls(&body).is_empty() {
        return vec![Issue::warn(
            &file.rel_path,
            "No inline citations in body; guidance is ungrounded",
        )];
    }
    Vec::new()
}

/// Opt-in, network-dependent: every source URL must answer with a success
/// status. Each URL gets its own short timeout; any failure is a warning and
/// never escalates to a run-level failure.
pub fn check_source_accessibility(file: &TopicFile) -> Vec<Issue> {
    let urls: Vec<&String> = file
        .frontmatter
        .sources
        .iter()
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();
    if urls.is_empty() {
        return Vec::new();
    }

    let client = match reqwest::blocking::Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .user_agent("curator-link-check")
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            return vec![Issue::warn(
                &file.rel_path,
                format!("Could not build HTTP client for link check: {err}"),
            )]
        }
    };

    let mut issues = Vec::new();
    for url in urls {
        match client.get(url.as_str()).send() {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => issues.push(Issue::warn(
                &file.rel_path,
                format!("Source URL returned HTTP {}: {url}", response.status().as_u16()),
            )),
            Err(err) => issues.push(Issue::warn(
                &file.rel_path,
                format!("Source URL unreachable: {url} ({err})"),
            )),
        }
    }
    issues
}
