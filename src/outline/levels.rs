//! Heading level inference from the font size distribution.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Candidate, FontSize, HeadingLevel};

use super::cluster::cluster_1d;
use super::options::OutlineOptions;

/// Lookup table from rounded font size to heading level.
///
/// Not total: sizes without a level produce no outline entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeLevelMap {
    levels: BTreeMap<FontSize, HeadingLevel>,
}

impl SizeLevelMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a level to a size.
    pub fn insert(&mut self, size: FontSize, level: HeadingLevel) {
        self.levels.insert(size, level);
    }

    /// Level for a size, if it has one.
    pub fn get(&self, size: FontSize) -> Option<HeadingLevel> {
        self.levels.get(&size).copied()
    }

    /// Number of sizes with a level.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no size has a level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Entries, largest size first.
    pub fn iter(&self) -> impl Iterator<Item = (FontSize, HeadingLevel)> + '_ {
        self.levels.iter().rev().map(|(s, l)| (*s, *l))
    }

    /// Sizes mapped to the given level, largest first.
    pub fn sizes_for(&self, level: HeadingLevel) -> Vec<FontSize> {
        self.iter()
            .filter(|(_, l)| *l == level)
            .map(|(s, _)| s)
            .collect()
    }
}

impl FromIterator<(FontSize, HeadingLevel)> for SizeLevelMap {
    fn from_iter<I: IntoIterator<Item = (FontSize, HeadingLevel)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

/// Candidate count per distinct size, most frequent first.
///
/// Equal counts keep the order in which sizes first appear.
pub fn size_histogram(candidates: &[Candidate]) -> Vec<(FontSize, usize)> {
    let mut histogram: Vec<(FontSize, usize)> = Vec::new();
    let mut index: HashMap<FontSize, usize> = HashMap::new();

    for candidate in candidates {
        match index.get(&candidate.size) {
            Some(&i) => histogram[i].1 += 1,
            None => {
                index.insert(candidate.size, histogram.len());
                histogram.push((candidate.size, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among ties.
    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    histogram
}

/// Infer the size to level mapping with default options.
pub fn infer_levels(candidates: &[Candidate]) -> SizeLevelMap {
    infer_levels_with(candidates, &OutlineOptions::default())
}

/// Infer the size to level mapping.
///
/// The most frequent sizes are clustered into one group per heading level;
/// the group with the largest center becomes H1. Fewer distinct sizes than
/// levels yields an empty map.
pub fn infer_levels_with(candidates: &[Candidate], options: &OutlineOptions) -> SizeLevelMap {
    let common: Vec<FontSize> = size_histogram(candidates)
        .into_iter()
        .take(options.max_sizes)
        .map(|(size, _)| size)
        .collect();

    if common.len() < HeadingLevel::COUNT {
        log::debug!(
            "Only {} distinct candidate sizes, no heading hierarchy",
            common.len()
        );
        return SizeLevelMap::new();
    }

    let points: Vec<f64> = common.iter().map(|s| s.points()).collect();
    let Some(clustering) = cluster_1d(&points, HeadingLevel::COUNT, options.strategy) else {
        return SizeLevelMap::new();
    };
    let ranks = clustering.descending_ranks();

    let map: SizeLevelMap = common
        .iter()
        .zip(clustering.assignments.iter())
        .filter_map(|(&size, &cluster)| {
            HeadingLevel::from_rank(ranks[cluster]).map(|level| (size, level))
        })
        .collect();

    log::debug!(
        "Inferred levels (inertia {:.3}): {}",
        clustering.inertia,
        map.iter()
            .map(|(s, l)| format!("{}pt={}", s, l))
            .collect::<Vec<_>>()
            .join(", ")
    );

    map
}
