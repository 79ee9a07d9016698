//! Loading and validating votes before they reach the resolver.
//!
//! The resolver trusts its input; the checks here mirror the constraints of
//! the voter form (at least one voter, one rank, one candidate per rank,
//! weights and percents in range).

use crate::model::election::Vote;
use std::fs;
use std::path::Path;

pub mod store;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed votes JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No votes given")]
    NoVotes,
    #[error("Vote {index} ({voter}): {reason}")]
    InvalidVote {
        index: usize,
        voter: String,
        reason: String,
    },
}

pub type InputResult<T> = std::result::Result<T, InputError>;

pub fn parse_votes(json: &str) -> InputResult<Vec<Vote>> {
    let votes: Vec<Vote> = serde_json::from_str(json)?;
    validate_votes(&votes)?;
    Ok(votes)
}

pub fn load_votes(path: &Path) -> InputResult<Vec<Vote>> {
    let json = fs::read_to_string(path)?;
    parse_votes(&json)
}

/// Check votes against the form constraints. Percent sums within a rank are
/// deliberately left unchecked.
pub fn validate_votes(votes: &[Vote]) -> InputResult<()> {
    if votes.is_empty() {
        return Err(InputError::NoVotes);
    }

    for (index, vote) in votes.iter().enumerate() {
        let invalid = |reason: String| InputError::InvalidVote {
            index,
            voter: vote.voter.clone(),
            reason,
        };

        if !vote.weight.is_finite() || vote.weight < 0.0 {
            return Err(invalid(format!("weight {} is not a non-negative number", vote.weight)));
        }
        if vote.order.is_empty() {
            return Err(invalid("no candidates ranked".to_string()));
        }

        for (rank, proposal) in vote.order.iter().enumerate() {
            if proposal.is_empty() {
                return Err(invalid(format!("rank {} is empty", rank + 1)));
            }
            for share in proposal {
                if share.candidate.trim().is_empty() {
                    return Err(invalid(format!("rank {} has an unnamed candidate", rank + 1)));
                }
                if !share.percent.is_finite() || !(0.0..=100.0).contains(&share.percent) {
                    return Err(invalid(format!(
                        "rank {}: {} has percent {} outside 0..=100",
                        rank + 1,
                        share.candidate,
                        share.percent
                    )));
                }
            }
        }
    }

    Ok(())
}
