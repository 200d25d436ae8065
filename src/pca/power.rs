//! Covariance and power-iteration internals for the PCA projector.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Dot product of two equal-length vectors.
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Column-wise means of a row-major matrix with `columns` columns.
pub(crate) fn column_means(rows: &[Vec<f64>], columns: usize) -> Vec<f64> {
    let m = rows.len() as f64;
    (0..columns)
        .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / m)
        .collect()
}

/// Sample covariance matrix of mean-centered rows.
///
/// Uses the unbiased `m - 1` denominator. A single-row matrix has no
/// variance information, so it yields an all-zero matrix rather than a
/// division by zero.
pub(crate) fn covariance(centered: &[Vec<f64>], columns: usize) -> Vec<Vec<f64>> {
    let m = centered.len();
    let mut cov = vec![vec![0.0f64; columns]; columns];
    if m < 2 {
        return cov;
    }
    let denom = (m - 1) as f64;
    for i in 0..columns {
        for j in 0..columns {
            cov[i][j] = centered.iter().map(|row| row[i] * row[j]).sum::<f64>() / denom;
        }
    }
    cov
}

/// True when every covariance entry is below `epsilon` in magnitude.
pub(crate) fn is_degenerate(cov: &[Vec<f64>], epsilon: f64) -> bool {
    cov.iter()
        .all(|row| row.iter().all(|value| value.abs() < epsilon))
}

/// Extract the dominant eigenvector of a square matrix by power
/// iteration from a seeded random start vector.
///
/// Stops early when the intermediate norm collapses below `epsilon`,
/// which guards against degenerate sub-spaces (the current estimate is
/// returned as-is in that case).
pub(crate) fn power_iteration(
    matrix: &[Vec<f64>],
    iterations: usize,
    epsilon: f64,
    rng: &mut ChaCha8Rng,
) -> Vec<f64> {
    let n = matrix.len();
    let mut b: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    for _ in 0..iterations {
        let product: Vec<f64> = matrix.iter().map(|row| dot(row, &b)).collect();
        let norm = dot(&product, &product).sqrt();
        if norm < epsilon {
            tracing::debug!("power iteration norm collapsed, stopping early");
            break;
        }
        b = product.into_iter().map(|value| value / norm).collect();
    }
    b
}

/// Remove the `pc1` component from each row of the matrix so a second
/// power iteration finds the next principal direction.
pub(crate) fn deflate(matrix: &[Vec<f64>], pc1: &[f64]) -> Vec<Vec<f64>> {
    matrix
        .iter()
        .map(|row| {
            let projection = dot(pc1, row);
            row.iter()
                .zip(pc1.iter())
                .map(|(&value, &component)| value - component * projection)
                .collect()
        })
        .collect()
}
