//! End-to-end orchestration: vote matrix in, analysis report out.
//!
//! The pipeline wires the stages together in their natural order:
//! PCA projection, silhouette-driven selection of the group count
//! (unless the caller fixed one), k-means on the projected points,
//! and group-aware consensus scoring over the discovered groups.

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::consensus::{
    calculate_group_aware_consensus, rank_comments, validate_groups, ConsensusScore, Group,
};
use crate::error::Result;
use crate::kmeans::KMeansClusterer;
use crate::matrix::VoteMatrix;
use crate::pca::{PcaProjector, ProjectedPoint};
use crate::silhouette::{best_k, find_optimal_clusters, SilhouetteResult};

/// Group count used when the silhouette sweep yields no usable k.
const FALLBACK_GROUP_COUNT: usize = 2;

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 2D opinion-space coordinates, one per participant in row order.
    pub projection: Vec<ProjectedPoint>,
    /// Silhouette sweep results, empty when the group count was fixed.
    pub silhouette: Vec<SilhouetteResult>,
    /// The sweep's recommended k, `None` when fixed or inconclusive.
    pub best_k: Option<usize>,
    /// The group count actually used for clustering.
    pub group_count: usize,
    /// Discovered opinion groups with participant ids as members.
    pub groups: Vec<Group>,
    /// Consensus scores ranked descending, ties in comment order.
    pub ranked: Vec<ConsensusScore>,
}

impl AnalysisReport {
    /// Ranked comments whose score meets the given threshold.
    #[must_use]
    pub fn consensus_comments(&self, threshold: f64) -> Vec<ConsensusScore> {
        self.ranked
            .iter()
            .copied()
            .filter(|score| score.score >= threshold)
            .collect()
    }
}

/// Synchronous analysis pipeline over a vote matrix.
///
/// Each run is a pure function of the matrix and configuration; the
/// matrix is never mutated and no state is carried between runs, so
/// group ids from one run bear no relation to the next.
#[derive(Debug, Clone, Default)]
pub struct ConsensusPipeline {
    config: PipelineConfig,
}

impl ConsensusPipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the full analysis on one vote matrix.
    ///
    /// When `cluster_count` is fixed in the configuration it is used
    /// as-is and the silhouette sweep is skipped. Otherwise the sweep
    /// recommends k, falling back to 2 (capped at the participant
    /// count) when it is inconclusive.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from the stages; a fixed
    /// `cluster_count` larger than the participant count surfaces as
    /// [`crate::ConsensusError::InvalidClusterCount`].
    pub fn analyze(&self, matrix: &VoteMatrix) -> Result<AnalysisReport> {
        let projector = PcaProjector::new(self.config.pca.clone());
        let projection = projector.project(matrix)?;
        let points: Vec<[f64; 2]> = projection.iter().map(|p| [p.x, p.y]).collect();

        let (silhouette, recommended) = match self.config.cluster_count {
            Some(_) => (Vec::new(), None),
            None => {
                let results =
                    find_optimal_clusters(&points, &self.config.sweep, &self.config.kmeans)?;
                let recommended = best_k(&results).map(|result| result.k);
                (results, recommended)
            }
        };

        let group_count = self.config.cluster_count.unwrap_or_else(|| {
            recommended.unwrap_or(FALLBACK_GROUP_COUNT).min(points.len())
        });
        tracing::debug!("clustering projection into {group_count} groups");

        let clusterer = KMeansClusterer::new(self.config.kmeans.clone());
        let clusters = clusterer.cluster_2d(&points, group_count)?;
        let groups: Vec<Group> = clusters
            .into_iter()
            .map(|cluster| Group {
                centroid: [cluster.centroid[0], cluster.centroid[1]],
                members: cluster
                    .members
                    .iter()
                    .map(|&index| projection[index].id)
                    .collect(),
            })
            .collect();

        validate_groups(matrix, &groups)?;
        let ranked = rank_comments(calculate_group_aware_consensus(matrix, &groups));

        Ok(AnalysisReport {
            projection,
            silhouette,
            best_k: recommended,
            group_count,
            groups,
            ranked,
        })
    }

    /// Ranked comments meeting the configured consensus threshold.
    ///
    /// Convenience over [`AnalysisReport::consensus_comments`] using
    /// `consensus_threshold` from the pipeline configuration.
    #[must_use]
    pub fn consensus_comments(&self, report: &AnalysisReport) -> Vec<ConsensusScore> {
        report.consensus_comments(self.config.consensus_threshold)
    }
}
