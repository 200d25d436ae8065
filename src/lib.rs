//! # vote-consensus-rs
//!
//! Opinion-group discovery and group-aware consensus ranking over
//! participant vote matrices, the analytical core of a pol.is-style
//! opinion tool.
//!
//! Participants vote agree (+1), disagree (-1), or pass (0) on a set
//! of comments. The pipeline reduces the vote matrix to a 2D opinion
//! space with power-iteration PCA, discovers opinion groups with
//! k-means (choosing the cluster count by silhouette score unless the
//! caller fixes one), and ranks comments by a Laplace-smoothed
//! cross-group agreement product.
//!
//! ## Quick start
//!
//! ```
//! use vote_consensus_rs::{ConsensusPipeline, PipelineConfig, VoteMatrix};
//!
//! let matrix = VoteMatrix::new(vec![
//!     vec![1, -1, 0, 1],
//!     vec![-1, 1, 1, 0],
//!     vec![1, 1, -1, 1],
//!     vec![0, -1, 1, -1],
//! ])?;
//!
//! let pipeline = ConsensusPipeline::new(PipelineConfig::default());
//! let report = pipeline.analyze(&matrix)?;
//!
//! assert_eq!(report.projection.len(), 4);
//! for score in &report.ranked {
//!     println!("comment {} scored {:.3}", score.comment, score.score);
//! }
//! # Ok::<(), vote_consensus_rs::ConsensusError>(())
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: vote matrix validation, shape queries, and tallies
//! - [`pca`]: power-iteration PCA projection to 2D
//! - [`kmeans`]: k-means clustering of projected points
//! - [`silhouette`]: clustering quality scoring and the k-sweep
//! - [`consensus`]: group-aware consensus scoring and ranking
//! - [`pipeline`]: end-to-end orchestration
//! - [`config`]: per-stage configuration
//! - [`error`]: error types and result alias
//!
//! ## Determinism
//!
//! PCA and k-means are randomized algorithms. Both draw from a
//! [`rand_chacha`] generator seeded through their configs, so a fixed
//! seed reproduces a run exactly; PCA output is still only defined up
//! to the sign of the principal axes. Everything downstream of
//! clustering is pure and deterministic.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod consensus;
pub mod error;
pub mod kmeans;
pub mod matrix;
pub mod pca;
pub mod pipeline;
pub mod silhouette;

pub use config::{KMeansConfig, PcaConfig, PipelineConfig, SweepConfig};
pub use consensus::{
    calculate_group_aware_consensus, rank_comments, validate_groups, ConsensusScore, Group,
};
pub use error::{ConsensusError, Result};
pub use kmeans::{Cluster, KMeansClusterer};
pub use matrix::{VoteMatrix, VoteTally};
pub use pca::{PcaProjector, ProjectedPoint};
pub use pipeline::{AnalysisReport, ConsensusPipeline};
pub use silhouette::{best_k, find_optimal_clusters, silhouette_coefficient, SilhouetteResult};
