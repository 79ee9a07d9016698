// Weighted tabulation of liquid preference ranks.

use crate::model::election::{CandidateWeighted, HeadVote, Supporter, Weight};
use std::collections::HashMap;

pub mod round;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("Winning margin must be a finite number above zero, got {0}")]
    WinningMargin(Weight),
    #[error("Tie tolerance must be a finite, non-negative number, got {0}")]
    TieTolerance(Weight),
}

/// Tabulation options
///
/// Built through [`ResolveOptions::new`], which only accepts a positive finite
/// margin and a non-negative finite tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveOptions {
    winning_margin: Weight,
    tie_tolerance: Weight,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            winning_margin: 1.0,
            tie_tolerance: 0.0,
        }
    }
}

impl ResolveOptions {
    pub fn new(winning_margin: Weight, tie_tolerance: Weight) -> Result<Self, OptionsError> {
        if !winning_margin.is_finite() || winning_margin <= 0.0 {
            return Err(OptionsError::WinningMargin(winning_margin));
        }
        if !tie_tolerance.is_finite() || tie_tolerance < 0.0 {
            return Err(OptionsError::TieTolerance(tie_tolerance));
        }
        Ok(Self {
            winning_margin,
            tie_tolerance,
        })
    }

    /// Weight added to the strongest opponent to get the minimum winning weight.
    /// Absolute, in the same units as voter weights.
    pub fn winning_margin(&self) -> Weight {
        self.winning_margin
    }

    /// Top-two weights closer than this are a collision. Zero means exact equality.
    pub fn tie_tolerance(&self) -> Weight {
        self.tie_tolerance
    }

    pub fn is_tie(&self, a: Weight, b: Weight) -> bool {
        (a - b).abs() <= self.tie_tolerance
    }
}

/// Sum each voter's head-rank support per candidate.
///
/// A voter contributes `weight * percent / 100` to every candidate in its head
/// rank. Candidates come back sorted by descending weight; equal weights keep
/// the order in which the candidates were first seen.
pub fn tabulate<'a, I>(votes: I) -> Vec<CandidateWeighted>
where
    I: IntoIterator<Item = &'a HeadVote>,
{
    let mut tallies: Vec<CandidateWeighted> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for vote in votes {
        for share in &vote.head {
            let support = vote.weight * (share.percent / 100.0);
            let slot = *index.entry(share.candidate.clone()).or_insert_with(|| {
                tallies.push(CandidateWeighted {
                    candidate: share.candidate.clone(),
                    weight: 0.0,
                    supporters: Vec::new(),
                });
                tallies.len() - 1
            });

            let tally = &mut tallies[slot];
            tally.weight += support;
            tally.supporters.push(Supporter {
                voter: vote.voter.clone(),
                weight: support,
            });
        }
    }

    // `sort_by` is stable, so encounter order survives among equal weights.
    tallies.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    tallies
}
