//! Outline-side types: heading candidates, levels and the per-document result.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FontSize, StyleFlags};

/// A text run that passed the candidate filter.
///
/// Same fields as the run it came from, with trimmed text and a rounded size.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub font: String,
    pub size: FontSize,
    pub flags: StyleFlags,
    pub page: u32,
    pub y: f32,
}

/// Heading level, most prominent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// All levels in rank order.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Number of distinct levels.
    pub const COUNT: usize = Self::ALL.len();

    /// Level for a descending-size rank (0 = largest).
    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    /// Numeric depth: 1 for H1, 2 for H2, 3 for H3.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label used in the JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heading in the final outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

/// Title and outline of one document. Field order is the JSON field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentResult {
    /// Count entries at each level.
    pub fn level_counts(&self) -> [usize; HeadingLevel::COUNT] {
        let mut counts = [0; HeadingLevel::COUNT];
        for entry in &self.outline {
            counts[usize::from(entry.level.depth()) - 1] += 1;
        }
        counts
    }
}
