//! Vote matrix validation and shape queries.
//!
//! A [`VoteMatrix`] is rectangular: rows are participants, columns are
//! comments, and every cell is a vote in {-1, 0, 1}. Construction
//! validates the whole matrix once so downstream stages never re-check.

use serde::{Deserialize, Serialize};

use crate::error::{ConsensusError, Result};

/// Agree vote value.
pub const AGREE: i8 = 1;
/// Disagree vote value.
pub const DISAGREE: i8 = -1;
/// Pass (abstain) vote value.
pub const PASS: i8 = 0;

/// A validated participants × comments vote matrix.
///
/// Invariants held after construction: at least one row and one column,
/// all rows the same length, every cell in {-1, 0, 1}. The matrix is
/// immutable; analysis stages borrow it and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteMatrix {
    rows: Vec<Vec<i8>>,
}

impl VoteMatrix {
    /// Validate and wrap a raw vote grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConsensusError::EmptyInput`] when there are no rows or
    /// no columns, [`ConsensusError::RaggedMatrix`] when row lengths
    /// differ, and [`ConsensusError::InvalidVote`] when a cell is
    /// outside {-1, 0, 1}.
    pub fn new(rows: Vec<Vec<i8>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(ConsensusError::EmptyInput(
                "vote matrix has no rows".to_string(),
            ));
        }
        let columns = rows[0].len();
        if columns == 0 {
            return Err(ConsensusError::EmptyInput(
                "vote matrix has no columns".to_string(),
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(ConsensusError::RaggedMatrix {
                    row: i,
                    expected: columns,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if !(-1..=1).contains(&value) {
                    return Err(ConsensusError::InvalidVote {
                        row: i,
                        column: j,
                        value,
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of participants (rows).
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of comments (columns).
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.rows[0].len()
    }

    /// The vote of one participant on one comment.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn vote(&self, participant: usize, comment: usize) -> i8 {
        self.rows[participant][comment]
    }

    /// Borrow the underlying rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<i8>] {
        &self.rows
    }

    /// Tally agree/disagree/pass counts over the whole matrix.
    #[must_use]
    pub fn tally(&self) -> VoteTally {
        let mut tally = VoteTally::default();
        for row in &self.rows {
            for &vote in row {
                tally.count(vote);
            }
        }
        tally
    }

    /// Tally agree/disagree/pass counts for a single comment column.
    ///
    /// # Panics
    ///
    /// Panics if `comment` is out of range.
    #[must_use]
    pub fn tally_comment(&self, comment: usize) -> VoteTally {
        let mut tally = VoteTally::default();
        for row in &self.rows {
            tally.count(row[comment]);
        }
        tally
    }
}

/// Counts of each vote kind over some slice of the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Number of agree (+1) votes.
    pub agree: usize,
    /// Number of disagree (-1) votes.
    pub disagree: usize,
    /// Number of pass (0) votes.
    pub pass: usize,
}

impl VoteTally {
    fn count(&mut self, vote: i8) {
        match vote {
            AGREE => self.agree += 1,
            DISAGREE => self.disagree += 1,
            _ => self.pass += 1,
        }
    }

    /// Total number of votes tallied.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.agree + self.disagree + self.pass
    }

    /// Fraction of votes that were agree, or 0 for an empty tally.
    #[must_use]
    pub fn agree_fraction(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.agree as f64 / self.total() as f64
        }
    }
}
