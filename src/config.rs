//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration structs for each stage:
//! - [`PcaConfig`]: power-iteration PCA settings
//! - [`KMeansConfig`]: k-means clustering settings
//! - [`SweepConfig`]: silhouette k-sweep bounds
//! - [`PipelineConfig`]: end-to-end orchestration settings

use serde::{Deserialize, Serialize};

/// Configuration for power-iteration PCA.
///
/// # Example
///
/// ```
/// use vote_consensus_rs::PcaConfig;
///
/// let config = PcaConfig::default().with_seed(7).with_iterations(200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaConfig {
    /// Number of power-iteration steps per component.
    pub iterations: usize,

    /// Magnitude below which variance is treated as zero.
    pub epsilon: f64,

    /// Random seed for the power-iteration start vector.
    pub seed: u64,
}

impl Default for PcaConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            epsilon: 1e-10,
            seed: 42,
        }
    }
}

impl PcaConfig {
    /// Set the power-iteration step count.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the zero-variance epsilon.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Configuration for k-means clustering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Maximum relocation iterations before giving up on convergence.
    pub max_iterations: usize,

    /// Random seed for centroid initialization.
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            seed: 42,
        }
    }
}

impl KMeansConfig {
    /// Set the iteration cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Bounds for the silhouette k-sweep.
///
/// The effective upper bound of the sweep is
/// `min(end_k, points - 1)`: silhouette scoring needs at least one
/// cluster with more than one member, so k equal to the point count is
/// never evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Smallest cluster count to evaluate.
    pub start_k: usize,

    /// Largest cluster count to evaluate (before the point-count cap).
    pub end_k: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { start_k: 2, end_k: 9 }
    }
}

impl SweepConfig {
    /// Set the lower sweep bound.
    #[must_use]
    pub const fn with_start_k(mut self, start_k: usize) -> Self {
        self.start_k = start_k;
        self
    }

    /// Set the upper sweep bound.
    #[must_use]
    pub const fn with_end_k(mut self, end_k: usize) -> Self {
        self.end_k = end_k;
        self
    }
}

/// Configuration for the end-to-end analysis pipeline.
///
/// # Example
///
/// ```
/// use vote_consensus_rs::PipelineConfig;
///
/// // Fix the group count instead of sweeping for it.
/// let config = PipelineConfig::default().with_cluster_count(Some(3));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// PCA stage settings.
    pub pca: PcaConfig,

    /// K-means stage settings.
    pub kmeans: KMeansConfig,

    /// Silhouette sweep bounds.
    pub sweep: SweepConfig,

    /// Fixed group count. `None` selects k via the silhouette sweep.
    pub cluster_count: Option<usize>,

    /// Minimum score for a comment to count as cross-group consensus.
    pub consensus_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pca: PcaConfig::default(),
            kmeans: KMeansConfig::default(),
            sweep: SweepConfig::default(),
            cluster_count: None,
            consensus_threshold: 0.5,
        }
    }
}

impl PipelineConfig {
    /// Set or clear the fixed group count.
    #[must_use]
    pub const fn with_cluster_count(mut self, cluster_count: Option<usize>) -> Self {
        self.cluster_count = cluster_count;
        self
    }

    /// Set the consensus threshold.
    #[must_use]
    pub const fn with_consensus_threshold(mut self, threshold: f64) -> Self {
        self.consensus_threshold = threshold;
        self
    }

    /// Set the PCA stage settings.
    #[must_use]
    pub fn with_pca(mut self, pca: PcaConfig) -> Self {
        self.pca = pca;
        self
    }

    /// Set the k-means stage settings.
    #[must_use]
    pub fn with_kmeans(mut self, kmeans: KMeansConfig) -> Self {
        self.kmeans = kmeans;
        self
    }

    /// Set the silhouette sweep bounds.
    #[must_use]
    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pca_defaults() {
        let config = PcaConfig::default();
        assert_eq!(config.iterations, 100);
        assert!((config.epsilon - 1e-10).abs() < 1e-20);
    }

    #[test]
    fn builders_chain() {
        let config = PcaConfig::default().with_iterations(50).with_seed(7);
        assert_eq!(config.iterations, 50);
        assert_eq!(config.seed, 7);

        let sweep = SweepConfig::default().with_start_k(3).with_end_k(6);
        assert_eq!(sweep.start_k, 3);
        assert_eq!(sweep.end_k, 6);
    }

    #[test]
    fn pipeline_defaults() {
        let config = PipelineConfig::default();
        assert!(config.cluster_count.is_none());
        assert!((config.consensus_threshold - 0.5).abs() < 1e-12);
        assert_eq!(config.sweep.start_k, 2);
        assert_eq!(config.sweep.end_k, 9);
    }

    #[test]
    fn config_roundtrips_through_serde() {
        let config = PipelineConfig::default().with_cluster_count(Some(4));
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cluster_count, Some(4));
    }
}
