//! One-dimensional clustering of font sizes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::options::ClusterStrategy;

/// Iteration cap for a single Lloyd run.
const MAX_ITERATIONS: usize = 300;

/// A partition of points into `k` clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster centers, indexed by cluster id
    pub centers: Vec<f64>,
    /// Cluster id of each input point
    pub assignments: Vec<usize>,
    /// Sum of squared distances of points to their centers
    pub inertia: f64,
}

impl Clustering {
    /// Rank of each cluster when centers are sorted descending (0 = largest).
    ///
    /// Equal centers keep cluster id order.
    pub fn descending_ranks(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.centers.len()).collect();
        order.sort_by(|&a, &b| {
            self.centers[b]
                .partial_cmp(&self.centers[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut ranks = vec![0; self.centers.len()];
        for (rank, cluster) in order.into_iter().enumerate() {
            ranks[cluster] = rank;
        }
        ranks
    }
}

/// Partition `points` into `k` clusters.
///
/// Returns `None` when there are fewer points than clusters.
pub fn cluster_1d(points: &[f64], k: usize, strategy: ClusterStrategy) -> Option<Clustering> {
    if k == 0 || points.len() < k {
        return None;
    }

    let clustering = match strategy {
        ClusterStrategy::KMeans { n_init, seed } => kmeans(points, k, n_init, seed),
        ClusterStrategy::Exhaustive => optimal_partition(points, k),
    };
    Some(clustering)
}

/// Best of `n_init` seeded k-means runs.
fn kmeans(points: &[f64], k: usize, n_init: usize, seed: u64) -> Clustering {
    let mut best: Option<Clustering> = None;

    for run in 0..n_init.max(1) {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(run as u64));
        let centers = initialize_centers(points, k, &mut rng);
        let candidate = lloyd(points, centers);

        let improves = best
            .as_ref()
            .map_or(true, |b| candidate.inertia < b.inertia);
        if improves {
            best = Some(candidate);
        }
    }

    best.unwrap_or_else(|| lloyd(points, points[..k].to_vec()))
}

/// k-means++ seeding: each next center is drawn with probability
/// proportional to its squared distance from the nearest chosen center.
fn initialize_centers(points: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.gen_range(0..points.len())]);

    while centers.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|&p| nearest(p, &centers).1)
            .collect();
        let total: f64 = weights.iter().sum();

        if total <= 0.0 {
            centers.push(points[rng.gen_range(0..points.len())]);
            continue;
        }

        let target = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut chosen = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if cumulative > target {
                chosen = i;
                break;
            }
        }
        centers.push(points[chosen]);
    }

    centers
}

/// Lloyd iterations until assignments stop changing.
fn lloyd(points: &[f64], mut centers: Vec<f64>) -> Clustering {
    let k = centers.len();
    let mut assignments = vec![usize::MAX; points.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (point, slot) in points.iter().zip(assignments.iter_mut()) {
            let (cluster, _) = nearest(*point, &centers);
            if *slot != cluster {
                *slot = cluster;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (point, &cluster) in points.iter().zip(assignments.iter()) {
            sums[cluster] += point;
            counts[cluster] += 1;
        }
        for cluster in 0..k {
            // Empty clusters keep their previous center.
            if counts[cluster] > 0 {
                centers[cluster] = sums[cluster] / counts[cluster] as f64;
            }
        }
    }

    let inertia = points
        .iter()
        .zip(assignments.iter())
        .map(|(p, &c)| (p - centers[c]).powi(2))
        .sum();

    Clustering {
        centers,
        assignments,
        inertia,
    }
}

/// Index of and squared distance to the nearest center (first wins on ties).
fn nearest(point: f64, centers: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centers.iter().enumerate() {
        let d = (point - c).powi(2);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// Exact minimum-inertia split of the sorted points into `k` contiguous groups.
fn optimal_partition(points: &[f64], k: usize) -> Clustering {
    let n = points.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .partial_cmp(&points[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted: Vec<f64> = order.iter().map(|&i| points[i]).collect();

    let mut prefix = vec![0.0; n + 1];
    let mut prefix_sq = vec![0.0; n + 1];
    for (i, v) in sorted.iter().enumerate() {
        prefix[i + 1] = prefix[i] + v;
        prefix_sq[i + 1] = prefix_sq[i] + v * v;
    }
    // Within-group sum of squares of sorted[i..j].
    let cost = |i: usize, j: usize| {
        let count = (j - i) as f64;
        let sum = prefix[j] - prefix[i];
        (prefix_sq[j] - prefix_sq[i] - sum * sum / count).max(0.0)
    };

    // best[m][j]: lowest cost of splitting sorted[..j] into m groups.
    let mut best = vec![vec![f64::INFINITY; n + 1]; k + 1];
    let mut split = vec![vec![0usize; n + 1]; k + 1];
    best[0][0] = 0.0;
    for m in 1..=k {
        for j in m..=n {
            for i in (m - 1)..j {
                let value = best[m - 1][i] + cost(i, j);
                if value < best[m][j] {
                    best[m][j] = value;
                    split[m][j] = i;
                }
            }
        }
    }

    let mut bounds = vec![n; k + 1];
    for m in (1..=k).rev() {
        bounds[m - 1] = split[m][bounds[m]];
    }

    let mut centers = Vec::with_capacity(k);
    let mut assignments = vec![0; n];
    for cluster in 0..k {
        let (start, end) = (bounds[cluster], bounds[cluster + 1]);
        centers.push((prefix[end] - prefix[start]) / (end - start) as f64);
        for &original in &order[start..end] {
            assignments[original] = cluster;
        }
    }

    Clustering {
        centers,
        assignments,
        inertia: best[k][n],
    }
}
