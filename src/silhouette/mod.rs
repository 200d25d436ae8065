//! Silhouette-coefficient clustering quality and the k-sweep.
//!
//! For each candidate k the sweep runs one k-means pass and scores the
//! resulting partition with the mean silhouette coefficient: for every
//! point, `a` is its mean distance to the rest of its own cluster and
//! `b` the smallest mean distance to any other non-empty cluster, and
//! the point scores `(b - a) / max(a, b)`. The sweep's upper bound is
//! capped at one less than the point count; with a cluster per point
//! neither `a` nor `b` is meaningful.

use serde::{Deserialize, Serialize};

use crate::config::{KMeansConfig, SweepConfig};
use crate::error::{ConsensusError, Result};
use crate::kmeans::{euclidean_distance, Cluster, KMeansClusterer};

/// Mean silhouette coefficient for one candidate cluster count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilhouetteResult {
    /// The cluster count that was evaluated.
    pub k: usize,
    /// Mean silhouette coefficient in [-1, 1], or NaN when the k-means
    /// run for this k failed.
    pub coefficient: f64,
}

/// Mean silhouette coefficient of a clustering over 2D points.
///
/// Points not covered by any cluster contribute no score; if no point
/// yields a valid score the coefficient is 0. A point alone in its
/// cluster has `a = 0`; when no other cluster has members its `b` is
/// undefined and the point scores 0.
#[must_use]
pub fn silhouette_coefficient(points: &[[f64; 2]], clusters: &[Cluster]) -> f64 {
    if clusters.is_empty() {
        return 0.0;
    }

    let mut owner = vec![None; points.len()];
    for (cluster_index, cluster) in clusters.iter().enumerate() {
        for &member in &cluster.members {
            if member < owner.len() {
                owner[member] = Some(cluster_index);
            }
        }
    }

    let mut total = 0.0;
    let mut scored = 0usize;
    for (i, point) in points.iter().enumerate() {
        let Some(own) = owner[i] else { continue };

        let a = mean_distance_within(point, i, &clusters[own].members, points);
        let mut b = f64::INFINITY;
        for (other_index, other) in clusters.iter().enumerate() {
            if other_index == own || other.members.is_empty() {
                continue;
            }
            b = b.min(mean_distance_to(point, &other.members, points));
        }

        let score = if !b.is_finite() || (a - b).abs() < f64::EPSILON {
            0.0
        } else {
            (b - a) / a.max(b)
        };
        total += score;
        scored += 1;
    }

    if scored == 0 {
        0.0
    } else {
        total / scored as f64
    }
}

/// Mean distance from a point to the other members of its own cluster,
/// 0 when it is the only member.
fn mean_distance_within(point: &[f64; 2], index: usize, members: &[usize], points: &[[f64; 2]]) -> f64 {
    if members.len() <= 1 {
        return 0.0;
    }
    let total: f64 = members
        .iter()
        .filter(|&&member| member != index)
        .map(|&member| euclidean_distance(point, &points[member]))
        .sum();
    total / (members.len() - 1) as f64
}

/// Mean distance from a point to every member of another cluster.
fn mean_distance_to(point: &[f64; 2], members: &[usize], points: &[[f64; 2]]) -> f64 {
    let total: f64 = members
        .iter()
        .map(|&member| euclidean_distance(point, &points[member]))
        .sum();
    total / members.len() as f64
}

/// Sweep k over `[start_k, min(end_k, points - 1)]`, clustering once
/// per k and scoring each partition.
///
/// A k whose k-means run fails records a NaN coefficient and the sweep
/// continues; one pathological k does not abort the search. Results
/// are ordered by increasing k and may be empty when the cap leaves no
/// candidates.
///
/// # Errors
///
/// Returns [`ConsensusError::EmptyInput`] for an empty point list.
pub fn find_optimal_clusters(
    points: &[[f64; 2]],
    sweep: &SweepConfig,
    kmeans: &KMeansConfig,
) -> Result<Vec<SilhouetteResult>> {
    if points.is_empty() {
        return Err(ConsensusError::EmptyInput(
            "silhouette sweep requires at least one point".to_string(),
        ));
    }

    let max_k = sweep.end_k.min(points.len().saturating_sub(1));
    let clusterer = KMeansClusterer::new(kmeans.clone());
    let mut results = Vec::new();
    for k in sweep.start_k..=max_k {
        match clusterer.cluster_2d(points, k) {
            Ok(clusters) => {
                let coefficient = silhouette_coefficient(points, &clusters);
                tracing::debug!("silhouette coefficient for k={k}: {coefficient}");
                results.push(SilhouetteResult { k, coefficient });
            }
            Err(err) => {
                tracing::warn!("k-means failed for k={k}: {err}");
                results.push(SilhouetteResult {
                    k,
                    coefficient: f64::NAN,
                });
            }
        }
    }
    Ok(results)
}

/// The sweep result with the highest coefficient.
///
/// NaN entries never win; the first of equal maxima is kept. Returns
/// `None` when the sweep is empty or every entry is NaN.
#[must_use]
pub fn best_k(results: &[SilhouetteResult]) -> Option<&SilhouetteResult> {
    let mut best: Option<&SilhouetteResult> = None;
    for result in results {
        if result.coefficient.is_nan() {
            continue;
        }
        match best {
            Some(current) if result.coefficient <= current.coefficient => {}
            _ => best = Some(result),
        }
    }
    best
}
