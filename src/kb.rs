//! Knowledge-base layout and the single discovery pass.
//!
//! Discovery runs exactly once per invocation; the resulting ordered list is
//! threaded into every validator batch, the trigger engine, and the
//! recommendation engine so all components agree on one inventory.

use crate::config::Settings;
use crate::parser::Frontmatter;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Structural index file, excluded from discovery.
pub const INDEX_FILE: &str = "index.md";
/// Area overview file name.
pub const OVERVIEW_FILE: &str = "overview.md";
/// Suffix of the terse reference companion to a working topic.
pub const REF_SUFFIX: &str = ".ref.md";

/// Handle on a knowledge-base root directory.
pub struct KnowledgeBase {
    root: PathBuf,
    knowledge_dir_name: String,
}

impl KnowledgeBase {
    /// Open a knowledge base, failing fast when the root or the knowledge
    /// directory does not exist. An empty-but-present knowledge base is
    /// valid; a missing one is infrastructural and fatal.
    pub fn open(root: &Path, settings: &Settings) -> Result<Self> {
        if !root.is_dir() {
            bail!("Knowledge root not found: {}", root.display());
        }
        let knowledge_dir = root.join(&settings.knowledge_dir);
        if !knowledge_dir.is_dir() {
            bail!(
                "Knowledge directory '{}' not found under {}",
                settings.knowledge_dir,
                root.display()
            );
        }
        Ok(Self {
            root: root.to_path_buf(),
            knowledge_dir_name: settings.knowledge_dir.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn knowledge_dir_name(&self) -> &str {
        &self.knowledge_dir_name
    }

    pub fn knowledge_dir(&self) -> PathBuf {
        self.root.join(&self.knowledge_dir_name)
    }

    /// Metadata directory holding config, history, and utilization state.
    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(".curator")
    }

    pub fn proposals_dir(&self) -> PathBuf {
        self.knowledge_dir().join("_proposals")
    }

    /// Area subdirectories of the knowledge directory, lexically sorted,
    /// skipping `_`-prefixed and hidden entries.
    pub fn area_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        let entries = fs::read_dir(self.knowledge_dir())
            .with_context(|| format!("Failed to list {}", self.knowledge_dir().display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('_') || name.starts_with('.') {
                    continue;
                }
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Discover all topic files: every `*.md` under the knowledge directory,
    /// lexically ordered, excluding `_`/`.`-prefixed directories and the
    /// structural index. Unreadable files degrade to empty content.
    pub fn discover(&self) -> Result<Vec<TopicFile>> {
        let knowledge_dir = self.knowledge_dir();
        let mut paths = Vec::new();
        collect_md_files(&knowledge_dir, &mut paths)?;
        paths.sort();

        let mut files = Vec::new();
        for path in paths {
            if path.file_name().and_then(|n| n.to_str()) == Some(INDEX_FILE) {
                continue;
            }
            let rel = path
                .strip_prefix(&knowledge_dir)
                .expect("discovered path is under the knowledge dir");
            let rel_path = format!("{}/{}", self.knowledge_dir_name, rel_path_string(rel));
            files.push(TopicFile::load(path, rel_path));
        }
        Ok(files)
    }
}

/// Recursively collect `.md` files, skipping `_`/`.`-prefixed directories.
fn collect_md_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if name.starts_with('_') || name.starts_with('.') {
            continue;
        }
        if path.is_dir() {
            collect_md_files(&path, out)?;
        } else if name.ends_with(".md") {
            out.push(path);
        }
    }
    Ok(())
}

fn rel_path_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// One discovered topic file, content and frontmatter loaded once.
///
/// Topic files are read-only to this engine; the loaded content is the
/// immutable input every validator and trigger operates on.
#[derive(Debug, Clone)]
pub struct TopicFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the knowledge-base root, forward slashes,
    /// e.g. `docs/area/topic.md`
    pub rel_path: String,
    pub content: String,
    pub frontmatter: Frontmatter,
}

impl TopicFile {
    /// Load a topic file. Unreadable content degrades to empty rather than
    /// failing; the frontmatter validator reports the resulting absences.
    pub fn load(path: PathBuf, rel_path: String) -> Self {
        let content = fs::read_to_string(&path).unwrap_or_default();
        let frontmatter = Frontmatter::parse(&content);
        Self {
            path,
            rel_path,
            content,
            frontmatter,
        }
    }

    pub fn file_name(&self) -> &str {
        self.rel_path.rsplit('/').next().unwrap_or(&self.rel_path)
    }

    /// Area slug, when the file sits directly inside an area directory
    /// (`<knowledge_dir>/<area>/<file>.md`).
    pub fn area(&self) -> Option<&str> {
        let mut parts = self.rel_path.split('/');
        let _knowledge_dir = parts.next()?;
        let area = parts.next()?;
        parts.next()?; // only area-level files have exactly three components
        if parts.next().is_some() {
            return None;
        }
        Some(area)
    }

    /// File stem without `.md` / `.ref.md`.
    pub fn stem(&self) -> &str {
        let name = self.file_name();
        name.strip_suffix(REF_SUFFIX)
            .or_else(|| name.strip_suffix(".md"))
            .unwrap_or(name)
    }

    pub fn is_reference_companion(&self) -> bool {
        self.file_name().ends_with(REF_SUFFIX)
    }

    pub fn is_overview(&self) -> bool {
        self.file_name() == OVERVIEW_FILE
    }

    /// Body text after the frontmatter block.
    pub fn body(&self) -> String {
        crate::parser::markdown::body_without_frontmatter(&self.content)
    }
}
