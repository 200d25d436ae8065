//! Error types for vote-matrix analysis.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, ConsensusError>;

/// Errors that can occur while analyzing a vote matrix.
///
/// All variants describe structurally invalid input and are raised
/// synchronously at the point of detection. Numeric edge cases (zero
/// variance, empty clusters, distance ties) are not errors; each stage
/// absorbs them with a documented fallback value.
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// Empty input where non-empty was required.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Vote matrix rows have inconsistent lengths.
    #[error("ragged vote matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        actual: usize,
    },

    /// A vote cell holds a value outside {-1, 0, 1}.
    #[error("invalid vote {value} at row {row}, column {column}: votes must be -1, 0, or 1")]
    InvalidVote {
        /// Participant (row) index of the offending cell.
        row: usize,
        /// Comment (column) index of the offending cell.
        column: usize,
        /// The out-of-range cell value.
        value: i8,
    },

    /// Point dimensionality differs from what the operation requires.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Cluster count is zero or exceeds the number of points.
    #[error("invalid cluster count {k} for {points} points")]
    InvalidClusterCount {
        /// Requested cluster count.
        k: usize,
        /// Number of points available.
        points: usize,
    },

    /// A group references a participant the matrix does not contain.
    #[error("group member {participant} out of range for matrix with {participants} participants")]
    MemberOutOfRange {
        /// The out-of-range participant id.
        participant: usize,
        /// Number of participants (rows) in the matrix.
        participants: usize,
    },
}
