//! K-means clustering over n-dimensional points.
//!
//! Standard Lloyd iteration: a seeded random point plus farthest-point
//! selection for the initial centroids, then alternate nearest-centroid
//! assignment and centroid recomputation until assignments stop
//! changing or the iteration cap is hit. Initialization depends on the
//! seed, so repeated runs with different seeds are not required to
//! produce identical cluster-id-to-member mappings, only a valid
//! partition.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::KMeansConfig;
use crate::error::{ConsensusError, Result};

/// A centroid plus the indices of the points assigned to it.
///
/// Member indices refer to positions in the input point slice. Over a
/// full result the member sets partition `0..points.len()`; an
/// individual cluster may legitimately be empty, in which case its
/// centroid is wherever initialization (or the last non-empty update)
/// left it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Mean position of the cluster's members.
    pub centroid: Vec<f64>,
    /// Indices of assigned points, ascending.
    pub members: Vec<usize>,
}

/// K-means clusterer configured with an iteration cap and seed.
#[derive(Debug, Clone)]
pub struct KMeansClusterer {
    config: KMeansConfig,
}

impl KMeansClusterer {
    /// Create a clusterer with the given configuration.
    #[must_use]
    pub const fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Partition `points` into `k` clusters.
    ///
    /// # Errors
    ///
    /// Returns [`ConsensusError::EmptyInput`] for an empty point list
    /// or zero-dimensional points, [`ConsensusError::DimensionMismatch`]
    /// when point dimensions are inconsistent, and
    /// [`ConsensusError::InvalidClusterCount`] when `k` is zero or
    /// exceeds the point count.
    pub fn cluster(&self, points: &[Vec<f64>], k: usize) -> Result<Vec<Cluster>> {
        if points.is_empty() {
            return Err(ConsensusError::EmptyInput(
                "k-means requires at least one point".to_string(),
            ));
        }
        let dim = points[0].len();
        if dim == 0 {
            return Err(ConsensusError::EmptyInput(
                "k-means points must have at least one dimension".to_string(),
            ));
        }
        for point in points {
            if point.len() != dim {
                return Err(ConsensusError::DimensionMismatch {
                    expected: dim,
                    actual: point.len(),
                });
            }
        }
        if k < 1 || k > points.len() {
            return Err(ConsensusError::InvalidClusterCount {
                k,
                points: points.len(),
            });
        }

        let n = points.len();
        let mut centroids = self.initial_centroids(points, k);
        let mut assignments = vec![0usize; n];
        let mut prev_assignments = vec![usize::MAX; n];

        for iteration in 0..self.config.max_iterations {
            // Assignment step. Strict < keeps the lowest-indexed
            // centroid on exact distance ties.
            for (i, point) in points.iter().enumerate() {
                let mut best = 0;
                let mut best_dist = f64::INFINITY;
                for (j, centroid) in centroids.iter().enumerate() {
                    let dist = euclidean_distance(point, centroid);
                    if dist < best_dist {
                        best_dist = dist;
                        best = j;
                    }
                }
                assignments[i] = best;
            }

            if assignments == prev_assignments {
                tracing::debug!("k-means converged at iteration {iteration}");
                break;
            }
            prev_assignments.clone_from(&assignments);

            // Update step: empty clusters retain their centroid.
            let mut sums = vec![vec![0.0f64; dim]; k];
            let mut counts = vec![0usize; k];
            for (i, &cluster) in assignments.iter().enumerate() {
                counts[cluster] += 1;
                for (d, &value) in points[i].iter().enumerate() {
                    sums[cluster][d] += value;
                }
            }
            for (j, sum) in sums.into_iter().enumerate() {
                if counts[j] > 0 {
                    centroids[j] = sum
                        .into_iter()
                        .map(|total| total / counts[j] as f64)
                        .collect();
                }
            }
        }

        Ok(build_clusters(&assignments, centroids, k))
    }

    /// Partition 2D points into `k` clusters.
    ///
    /// Entry point for the group-identification flow over PCA output,
    /// where the fixed arity enforces the two-dimensional contract.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::cluster`].
    pub fn cluster_2d(&self, points: &[[f64; 2]], k: usize) -> Result<Vec<Cluster>> {
        let general: Vec<Vec<f64>> = points.iter().map(|p| p.to_vec()).collect();
        self.cluster(&general, k)
    }

    /// Seeded k-means++-style initialization: a random first centroid,
    /// then repeatedly the point farthest from every chosen centroid.
    fn initial_centroids(&self, points: &[Vec<f64>], k: usize) -> Vec<Vec<f64>> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let first = rng.gen_range(0..points.len());
        let mut centroids = vec![points[first].clone()];

        for _ in 1..k {
            let distances: Vec<f64> = points
                .iter()
                .map(|point| {
                    centroids
                        .iter()
                        .map(|centroid| euclidean_distance(point, centroid))
                        .fold(f64::INFINITY, f64::min)
                })
                .collect();
            let farthest = distances
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .map_or(0, |(i, _)| i);
            centroids.push(points[farthest].clone());
        }

        centroids
    }
}

/// Euclidean distance between two equal-length points.
pub(crate) fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn build_clusters(assignments: &[usize], centroids: Vec<Vec<f64>>, k: usize) -> Vec<Cluster> {
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, &cluster) in assignments.iter().enumerate() {
        members[cluster].push(i);
    }
    centroids
        .into_iter()
        .zip(members)
        .map(|(centroid, members)| Cluster { centroid, members })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusterer() -> KMeansClusterer {
        KMeansClusterer::new(KMeansConfig::default())
    }

    fn assert_partition(clusters: &[Cluster], n: usize) {
        let mut seen = vec![0usize; n];
        for cluster in clusters {
            for &member in &cluster.members {
                seen[member] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1), "not a partition: {seen:?}");
    }

    #[test]
    fn partitions_points_exactly_once() {
        let points: Vec<Vec<f64>> = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.2],
            vec![10.0, 10.0],
            vec![10.1, 9.9],
            vec![-5.0, 4.0],
        ];
        for k in 1..=points.len() {
            let clusters = clusterer().cluster(&points, k).unwrap();
            assert_eq!(clusters.len(), k);
            assert_partition(&clusters, points.len());
        }
    }

    #[test]
    fn separates_two_obvious_blobs() {
        let points: Vec<Vec<f64>> = vec![
            vec![0.0, 0.0],
            vec![0.2, 0.1],
            vec![0.1, 0.3],
            vec![9.8, 10.1],
            vec![10.0, 10.0],
            vec![10.2, 9.9],
        ];
        let clusters = clusterer().cluster(&points, 2).unwrap();
        assert_partition(&clusters, points.len());
        // Every cluster should hold one blob, not a mix.
        for cluster in &clusters {
            let near_origin = cluster
                .members
                .iter()
                .filter(|&&i| points[i][0] < 5.0)
                .count();
            assert!(near_origin == 0 || near_origin == cluster.members.len());
        }
    }

    #[test]
    fn rejects_empty_input_and_bad_k() {
        assert!(matches!(
            clusterer().cluster(&[], 2),
            Err(ConsensusError::EmptyInput(_))
        ));
        let points = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert!(matches!(
            clusterer().cluster(&points, 0),
            Err(ConsensusError::InvalidClusterCount { k: 0, points: 2 })
        ));
        assert!(matches!(
            clusterer().cluster(&points, 3),
            Err(ConsensusError::InvalidClusterCount { k: 3, points: 2 })
        ));
    }

    #[test]
    fn rejects_inconsistent_dimensions() {
        let points = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            clusterer().cluster(&points, 1),
            Err(ConsensusError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn identical_points_tie_break_to_lowest_cluster() {
        // All distances tie, so every point lands in cluster 0 and the
        // other cluster stays empty with its initial centroid.
        let points: Vec<Vec<f64>> = vec![vec![1.0, 1.0]; 4];
        let clusters = clusterer().cluster(&points, 2).unwrap();
        assert_eq!(clusters[0].members, vec![0, 1, 2, 3]);
        assert!(clusters[1].members.is_empty());
        assert_eq!(clusters[1].centroid, vec![1.0, 1.0]);
    }

    #[test]
    fn cluster_2d_matches_general_entry_point() {
        let fixed: Vec<[f64; 2]> = vec![[0.0, 0.0], [1.0, 1.0], [10.0, 10.0]];
        let clusters = clusterer().cluster_2d(&fixed, 2).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_partition(&clusters, fixed.len());
    }
}
