//! Outline extraction options.

/// Default number of most frequent sizes considered for levels.
pub const DEFAULT_MAX_SIZES: usize = 6;

/// Title candidates nearer this vertical offset win ties on size.
pub const DEFAULT_TITLE_REFERENCE_Y: f32 = 100.0;

/// Title used when page 1 has no candidates.
pub const DEFAULT_FALLBACK_TITLE: &str = "Untitled Document";

/// How the selected font sizes are partitioned into levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterStrategy {
    /// Lloyd's k-means with k-means++ seeding, best of `n_init` seeded runs.
    KMeans {
        /// Number of initializations; the lowest-inertia run wins
        n_init: usize,
        /// Base seed; run `i` uses `seed + i`
        seed: u64,
    },
    /// Minimum-inertia contiguous partition of the sorted sizes.
    Exhaustive,
}

impl Default for ClusterStrategy {
    fn default() -> Self {
        ClusterStrategy::KMeans { n_init: 10, seed: 0 }
    }
}

/// Options for outline extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// How many of the most frequent candidate sizes get a level
    pub max_sizes: usize,

    /// Partitioning strategy for the selected sizes
    pub strategy: ClusterStrategy,

    /// Reference offset for the title tie-break
    pub title_reference_y: f32,

    /// Title returned when page 1 has no candidates
    pub fallback_title: String,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many frequent sizes are considered.
    pub fn with_max_sizes(mut self, max_sizes: usize) -> Self {
        self.max_sizes = max_sizes;
        self
    }

    /// Set the clustering strategy.
    pub fn with_strategy(mut self, strategy: ClusterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use k-means with the given seed, keeping the configured number of runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        let n_init = match self.strategy {
            ClusterStrategy::KMeans { n_init, .. } => n_init,
            ClusterStrategy::Exhaustive => 10,
        };
        self.strategy = ClusterStrategy::KMeans { n_init, seed };
        self
    }

    /// Use the exhaustive partitioner.
    pub fn exhaustive(mut self) -> Self {
        self.strategy = ClusterStrategy::Exhaustive;
        self
    }

    /// Set the title reference offset.
    pub fn with_title_reference_y(mut self, y: f32) -> Self {
        self.title_reference_y = y;
        self
    }

    /// Set the fallback title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_sizes: DEFAULT_MAX_SIZES,
            strategy: ClusterStrategy::default(),
            title_reference_y: DEFAULT_TITLE_REFERENCE_Y,
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = OutlineOptions::default();
        assert_eq!(options.max_sizes, 6);
        assert_eq!(options.title_reference_y, 100.0);
        assert_eq!(options.fallback_title, "Untitled Document");
        assert_eq!(
            options.strategy,
            ClusterStrategy::KMeans { n_init: 10, seed: 0 }
        );
    }

    #[test]
    fn test_options_builder() {
        let options = OutlineOptions::new()
            .with_max_sizes(8)
            .exhaustive()
            .with_seed(42)
            .with_title_reference_y(72.0)
            .with_fallback_title("Untitled");

        assert_eq!(options.max_sizes, 8);
        assert_eq!(
            options.strategy,
            ClusterStrategy::KMeans { n_init: 10, seed: 42 }
        );
        assert_eq!(options.title_reference_y, 72.0);
        assert_eq!(options.fallback_title, "Untitled");
    }
}
