//! Document-level types: outlines and the sections derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Title used when the first page yields no text.
pub const UNTITLED: &str = "Untitled";

/// A heading tier, H1 being the most prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Levels in order of prominence.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Level for a 0-based tier index, if one exists.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Numeric depth (1 for H1).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A line that passed the heading shape test.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Heading text
    pub text: String,
    /// Rounded font size
    pub size: i32,
    /// Page index (0-based)
    pub page: usize,
}

/// One entry of a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page index (0-based)
    pub page: usize,
}

/// Title plus ordered heading entries for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    /// Document title
    pub title: String,
    /// Headings in page, then line, order
    pub outline: Vec<OutlineEntry>,
}

impl Outline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, entries: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline: entries,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether the outline has no entries.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

/// A rankable section: heading text and the page it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text, also used as the section's representative text
    pub text: String,
    /// Page index (0-based)
    pub page: usize,
}

/// A document with its extracted outline.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name, as reported in output records
    pub name: String,
    /// Full path on disk
    pub path: PathBuf,
    /// Extracted outline
    pub outline: Outline,
}

impl Document {
    /// Create a document record.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, outline: Outline) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            outline,
        }
    }

    /// Sections used for ranking, in extraction order.
    pub fn sections(&self) -> Vec<Section> {
        self.outline
            .outline
            .iter()
            .map(|e| Section {
                text: e.text.clone(),
                page: e.page,
            })
            .collect()
    }
}
