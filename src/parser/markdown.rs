//! Markdown structure helpers shared by validators and triggers.
//!
//! All functions operate on plain text and are pure; nothing here touches the
//! filesystem.

use regex::Regex;

/// A markdown link extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub target: String,
}

impl Link {
    /// External targets (URLs, anchors, mailto) are skipped by the
    /// link-resolution validators.
    pub fn is_external(&self) -> bool {
        self.target.starts_with("http://")
            || self.target.starts_with("https://")
            || self.target.starts_with('#')
            || self.target.starts_with("mailto:")
    }

    /// Relative path portion of an internal target, anchor stripped.
    pub fn internal_path(&self) -> Option<&str> {
        if self.is_external() {
            return None;
        }
        let path = self.target.split('#').next().unwrap_or("");
        (!path.is_empty()).then_some(path)
    }
}

/// Body text after the frontmatter block, or the whole content when no
/// closed frontmatter block exists.
pub fn body_without_frontmatter(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut delimiters = 0usize;
    let mut start = 0usize;
    for (idx, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            delimiters += 1;
            if delimiters == 2 {
                start = idx + 1;
                break;
            }
        }
    }
    if delimiters < 2 {
        return content.to_string();
    }
    lines[start..].join("\n")
}

/// Blank out fenced code block contents, preserving line count.
pub fn strip_fenced_blocks(text: &str) -> String {
    let mut out = Vec::new();
    let mut in_fence = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push("");
        } else if in_fence {
            out.push("");
        } else {
            out.push(line);
        }
    }
    out.join("\n")
}

/// Remove inline markdown formatting (images, links, bold, italic, code),
/// keeping the plain text.
pub fn strip_inline_formatting(text: &str) -> String {
    let image = Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("valid regex");
    let link = Regex::new(r"\[([^\]]*)\]\([^)]+\)").expect("valid regex");
    let bold = Regex::new(r"\*\*(.+?)\*\*").expect("valid regex");
    let bold_us = Regex::new(r"__(.+?)__").expect("valid regex");
    let italic = Regex::new(r"\*(.+?)\*").expect("valid regex");
    let code = Regex::new(r"`([^`]+)`").expect("valid regex");

    let text = image.replace_all(text, "");
    let text = link.replace_all(&text, "$1");
    let text = bold.replace_all(&text, "$1");
    let text = bold_us.replace_all(&text, "$1");
    let text = italic.replace_all(&text, "$1");
    code.replace_all(&text, "$1").into_owned()
}

/// All heading levels in order of appearance, fenced code blocks excluded.
pub fn heading_levels(body: &str) -> Vec<usize> {
    let heading = Regex::new(r"^(#{1,6})\s+").expect("valid regex");
    strip_fenced_blocks(body)
        .lines()
        .filter_map(|line| heading.captures(line).map(|c| c[1].len()))
        .collect()
}

/// H2 heading texts in order of appearance.
pub fn h2_headings(body: &str) -> Vec<String> {
    strip_fenced_blocks(body)
        .lines()
        .filter_map(|line| line.strip_prefix("## ").map(|h| h.trim().to_string()))
        .collect()
}

/// Extract the text of the first H2 whose heading contains `heading`
/// (case-insensitive), up to the next H2 or end of input. Returns `None`
/// when no such section exists.
pub fn section(body: &str, heading: &str) -> Option<String> {
    let needle = heading.to_lowercase();
    let mut capturing = false;
    let mut lines = Vec::new();

    for line in body.lines() {
        if let Some(h) = line.strip_prefix("## ") {
            if capturing {
                break;
            }
            if h.trim().to_lowercase().contains(&needle) {
                capturing = true;
            }
        } else if capturing {
            lines.push(line);
        }
    }

    capturing.then(|| lines.join("\n"))
}

/// All `[text](target)` links in the text.
pub fn links(text: &str) -> Vec<Link> {
    let link = Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("valid regex");
    link.captures_iter(text)
        .map(|c| Link {
            text: c[1].to_string(),
            target: c[2].trim().to_string(),
        })
        .collect()
}

/// Inline citation URLs (`http(s)` link targets) in the text.
pub fn citation_urls(text: &str) -> Vec<String> {
    links(text)
        .into_iter()
        .filter(|l| l.target.starts_with("http://") || l.target.starts_with("https://"))
        .map(|l| l.target)
        .collect()
}

/// Paragraphs of 40+ characters, split on blank lines.
pub fn paragraphs(text: &str) -> Vec<String> {
    let splitter = Regex::new(r"\n\s*\n").expect("valid regex");
    splitter
        .split(text)
        .map(str::trim)
        .filter(|p| p.len() >= 40)
        .map(str::to_string)
        .collect()
}

/// Alphabetic words, lowercased.
pub fn words(text: &str) -> Vec<String> {
    let word = Regex::new(r"[A-Za-z]+").expect("valid regex");
    word.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Word count over the whole text (markdown stripped by the caller if needed).
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sliding `n`-word shingles, used for the duplicate-content similarity pass.
pub fn word_shingles(text: &str, n: usize) -> std::collections::HashSet<String> {
    let tokens = words(text);
    if tokens.len() < n {
        return Default::default();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

/// Top-level bullet items (`- ` / `* `) in the text.
pub fn bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_start)
        .filter(|l| l.starts_with("- ") || l.starts_with("* "))
        .map(|l| l[2..].trim().to_string())
        .collect()
}
