//! Small shared helpers.

/// Convert a human-readable name to a filename slug.
///
/// Lowercases, turns spaces and underscores into hyphens, drops everything
/// non-alphanumeric except hyphens, and collapses hyphen runs.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        match ch {
            ' ' | '_' => slug.push('-'),
            c if c.is_ascii_alphanumeric() || c == '-' => slug.push(c),
            _ => {}
        }
    }
    let mut collapsed = String::with_capacity(slug.len());
    for ch in slug.chars() {
        if ch == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(ch);
    }
    collapsed.trim_matches('-').to_string()
}

/// Host portion of an http(s) URL, port stripped.
pub fn url_host(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.split('@').next_back()?;
    let host = host.split(':').next()?;
    (!host.is_empty()).then_some(host)
}
