//! Closed enumerations declared in topic frontmatter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a frontmatter tier value is outside its closed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {field} '{value}'")]
pub struct ParseTierError {
    pub field: &'static str,
    pub value: String,
}

/// Declared depth of a topic file.
///
/// Governs expected size, section structure, and prose style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Overview,
    Working,
    Reference,
}

impl Depth {
    pub fn all() -> &'static [Depth] {
        &[Depth::Overview, Depth::Working, Depth::Reference]
    }

    /// Expected line-count range for files of this depth.
    pub fn line_bounds(&self) -> (usize, usize) {
        match self {
            Depth::Overview => (5, 150),
            Depth::Working => (10, 400),
            Depth::Reference => (3, 150),
        }
    }

    /// Expected body word-count range for files of this depth.
    pub fn word_bounds(&self) -> (usize, usize) {
        match self {
            Depth::Overview => (50, 1200),
            Depth::Working => (150, 3500),
            Depth::Reference => (30, 1000),
        }
    }

    /// Flesch-Kincaid grade bounds, if readability applies to this depth.
    ///
    /// Reference files are terse by design and are never scored.
    pub fn readability_bounds(&self) -> Option<(f64, f64)> {
        match self {
            Depth::Overview => Some((8.0, 14.0)),
            Depth::Working => Some((10.0, 16.0)),
            Depth::Reference => None,
        }
    }

    /// H2 sections every file of this depth must carry.
    pub fn required_sections(&self) -> &'static [&'static str] {
        match self {
            Depth::Overview => &["What This Covers", "How It's Organized"],
            Depth::Working => &[
                "Why This Matters",
                "In Practice",
                "Key Guidance",
                "Watch Out For",
                "Go Deeper",
            ],
            Depth::Reference => &[],
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Overview => write!(f, "overview"),
            Depth::Working => write!(f, "working"),
            Depth::Reference => write!(f, "reference"),
        }
    }
}

impl FromStr for Depth {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(Depth::Overview),
            "working" => Ok(Depth::Working),
            "reference" => Ok(Depth::Reference),
            _ => Err(ParseTierError {
                field: "depth",
                value: s.to_string(),
            }),
        }
    }
}

/// Declared relevance of a topic to the knowledge base's purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Core,
    Supporting,
    Peripheral,
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relevance::Core => write!(f, "core"),
            Relevance::Supporting => write!(f, "supporting"),
            Relevance::Peripheral => write!(f, "peripheral"),
        }
    }
}

impl FromStr for Relevance {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(Relevance::Core),
            "supporting" => Ok(Relevance::Supporting),
            "peripheral" => Ok(Relevance::Peripheral),
            _ => Err(ParseTierError {
                field: "relevance",
                value: s.to_string(),
            }),
        }
    }
}
