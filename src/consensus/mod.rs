//! Group-aware consensus scoring and comment ranking.
//!
//! A comment's consensus score is the product, over all opinion
//! groups, of a Laplace-smoothed within-group agreement probability:
//! `(agree + 1) / (votes + 2)`, where disagree and pass both count as
//! non-agree. A score of 1 would mean every group agreed unanimously;
//! smoothing keeps any single group from zeroing a comment outright.

use serde::{Deserialize, Serialize};

use crate::error::{ConsensusError, Result};
use crate::matrix::{VoteMatrix, AGREE};

/// An opinion group discovered by clustering the PCA projection.
///
/// Members are participant ids (matrix row indices), remapped from
/// projection indices through each point's id tag. Groups carry no
/// identity across clustering runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Centroid of the group in the 2D opinion space.
    pub centroid: [f64; 2],
    /// Participant ids belonging to this group.
    pub members: Vec<usize>,
}

/// A comment index paired with its cross-group consensus score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusScore {
    /// Comment (column) index in the vote matrix.
    pub comment: usize,
    /// Consensus score in [0, 1].
    pub score: f64,
}

/// Check that every group member id is a valid matrix row.
///
/// The scorer itself assumes in-range ids; the pipeline calls this
/// once at its boundary, and callers composing the scorer with their
/// own groups should do the same.
///
/// # Errors
///
/// Returns [`ConsensusError::MemberOutOfRange`] for the first id at or
/// beyond the participant count.
pub fn validate_groups(matrix: &VoteMatrix, groups: &[Group]) -> Result<()> {
    let participants = matrix.participant_count();
    for group in groups {
        for &member in &group.members {
            if member >= participants {
                return Err(ConsensusError::MemberOutOfRange {
                    participant: member,
                    participants,
                });
            }
        }
    }
    Ok(())
}

/// Score every comment by its Laplace-smoothed agreement probability
/// product across groups.
///
/// Pure and deterministic: identical inputs always produce identical
/// scores. An empty group has no votes and contributes the neutral
/// multiplier `1/2` by the smoothing formula. Member ids must be valid
/// matrix rows (see [`validate_groups`]).
#[must_use]
pub fn calculate_group_aware_consensus(matrix: &VoteMatrix, groups: &[Group]) -> Vec<ConsensusScore> {
    (0..matrix.comment_count())
        .map(|comment| {
            let mut score = 1.0;
            for group in groups {
                let agree = group
                    .members
                    .iter()
                    .filter(|&&member| matrix.vote(member, comment) == AGREE)
                    .count();
                score *= agree_probability(agree, group.members.len());
            }
            ConsensusScore { comment, score }
        })
        .collect()
}

/// Add-one smoothed probability that a group member agrees.
fn agree_probability(agree: usize, votes: usize) -> f64 {
    (agree + 1) as f64 / (votes + 2) as f64
}

/// Rank comments by descending consensus score.
///
/// Ties keep ascending comment-index order, so equal-scoring comments
/// come out in their original matrix order.
#[must_use]
pub fn rank_comments(mut scores: Vec<ConsensusScore>) -> Vec<ConsensusScore> {
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.comment.cmp(&b.comment))
    });
    scores
}
