//! Principal component analysis over the vote matrix.
//!
//! Reduces each participant's vote row to a 2D coordinate: mean-center
//! the matrix, build the comment×comment covariance matrix, extract the
//! two dominant eigenvectors by power iteration with deflation, and
//! project every centered row onto them.
//!
//! Power iteration starts from a seeded random vector, so results are
//! reproducible for a fixed seed only up to the sign of the principal
//! axes. Consumers should rely on invariant properties (shape,
//! centering, relative distances), not exact coordinates.

mod power;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::PcaConfig;
use crate::error::Result;
use crate::matrix::VoteMatrix;
use power::{column_means, covariance, deflate, dot, is_degenerate, power_iteration};

/// One participant's position in the 2D opinion space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// Index of the originating matrix row (participant id).
    pub id: usize,
    /// Coordinate along the first principal component.
    pub x: f64,
    /// Coordinate along the second principal component.
    pub y: f64,
    /// True when a non-finite coordinate was replaced by the origin.
    pub degenerate: bool,
}

impl ProjectedPoint {
    /// Whether this point's coordinates were substituted because the
    /// projection produced a non-finite value.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

/// Power-iteration PCA projector.
#[derive(Debug, Clone)]
pub struct PcaProjector {
    config: PcaConfig,
}

impl PcaProjector {
    /// Create a projector with the given configuration.
    #[must_use]
    pub const fn new(config: PcaConfig) -> Self {
        Self { config }
    }

    /// Project every participant row onto the first two principal
    /// components.
    ///
    /// Returns one point per matrix row, in row order, tagged with the
    /// row index as its id. When the covariance matrix carries no
    /// variance at all (identical rows, or a single participant) every
    /// point collapses to the origin. Non-finite projected coordinates
    /// are replaced by the origin and flagged on the point rather than
    /// raised.
    ///
    /// # Errors
    ///
    /// [`VoteMatrix`] construction already guarantees a non-empty
    /// rectangular matrix; the fallible signature is kept so the
    /// projector composes with the rest of the pipeline.
    pub fn project(&self, matrix: &VoteMatrix) -> Result<Vec<ProjectedPoint>> {
        let comments = matrix.comment_count();

        let rows: Vec<Vec<f64>> = matrix
            .rows()
            .iter()
            .map(|row| row.iter().map(|&vote| f64::from(vote)).collect())
            .collect();

        let means = column_means(&rows, comments);
        let centered: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(means.iter())
                    .map(|(value, mean)| value - mean)
                    .collect()
            })
            .collect();

        let cov = covariance(&centered, comments);
        if is_degenerate(&cov, self.config.epsilon) {
            tracing::debug!("zero-variance covariance matrix, collapsing projection to origin");
            return Ok((0..rows.len())
                .map(|id| ProjectedPoint {
                    id,
                    x: 0.0,
                    y: 0.0,
                    degenerate: false,
                })
                .collect());
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let pc1 = power_iteration(&cov, self.config.iterations, self.config.epsilon, &mut rng);
        let residual = deflate(&cov, &pc1);
        let pc2 = power_iteration(
            &residual,
            self.config.iterations,
            self.config.epsilon,
            &mut rng,
        );

        let mut substituted = 0usize;
        let projection = centered
            .iter()
            .enumerate()
            .map(|(id, row)| {
                let x = dot(row, &pc1);
                let y = dot(row, &pc2);
                if x.is_finite() && y.is_finite() {
                    ProjectedPoint {
                        id,
                        x,
                        y,
                        degenerate: false,
                    }
                } else {
                    substituted += 1;
                    ProjectedPoint {
                        id,
                        x: 0.0,
                        y: 0.0,
                        degenerate: true,
                    }
                }
            })
            .collect();
        if substituted > 0 {
            tracing::warn!("substituted origin for {substituted} non-finite projected points");
        }
        Ok(projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> PcaProjector {
        PcaProjector::new(PcaConfig::default())
    }

    fn distance(a: &ProjectedPoint, b: &ProjectedPoint) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn one_point_per_participant_in_row_order() {
        let matrix = VoteMatrix::new(vec![
            vec![1, -1, 0],
            vec![-1, 1, 0],
            vec![1, 1, 1],
            vec![0, -1, -1],
        ])
        .unwrap();
        let projection = projector().project(&matrix).unwrap();
        assert_eq!(projection.len(), 4);
        for (i, point) in projection.iter().enumerate() {
            assert_eq!(point.id, i);
            assert!(point.x.is_finite());
            assert!(point.y.is_finite());
        }
    }

    #[test]
    fn identical_rows_collapse_to_origin() {
        let matrix = VoteMatrix::new(vec![vec![1, 0, -1]; 5]).unwrap();
        let projection = projector().project(&matrix).unwrap();
        for point in &projection {
            assert!((point.x).abs() < 1e-12);
            assert!((point.y).abs() < 1e-12);
            assert!(!point.is_degenerate());
        }
    }

    #[test]
    fn single_participant_collapses_to_origin() {
        let matrix = VoteMatrix::new(vec![vec![1, -1, 1]]).unwrap();
        let projection = projector().project(&matrix).unwrap();
        assert_eq!(projection.len(), 1);
        assert!((projection[0].x).abs() < 1e-12);
        assert!((projection[0].y).abs() < 1e-12);
    }

    #[test]
    fn near_duplicate_rows_project_closer_than_opposed_rows() {
        let matrix = VoteMatrix::new(vec![
            vec![1, 1, 1],
            vec![1, 1, -1],
            vec![-1, -1, -1],
            vec![-1, -1, 1],
        ])
        .unwrap();
        let projection = projector().project(&matrix).unwrap();
        let near = distance(&projection[0], &projection[1]);
        let far = distance(&projection[0], &projection[2]);
        assert!(near < far, "near={near} far={far}");
    }

    #[test]
    fn fixed_seed_reproduces_projection() {
        let matrix = VoteMatrix::new(vec![
            vec![1, -1, 0, 1],
            vec![-1, 1, 1, 0],
            vec![1, 1, -1, 1],
            vec![0, -1, 1, -1],
        ])
        .unwrap();
        let first = projector().project(&matrix).unwrap();
        let second = projector().project(&matrix).unwrap();
        assert_eq!(first, second);
    }
}
