use serde::{Deserialize, Serialize};

pub type Voter = String;
pub type Weight = f64;

/// One candidate's share of a single preference rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateShare {
    pub candidate: String,
    /// Fraction of the voter's current weight, in `[0, 100]`.
    pub percent: f64,
}

impl CandidateShare {
    pub fn new(candidate: impl Into<String>, percent: f64) -> CandidateShare {
        CandidateShare {
            candidate: candidate.into(),
            percent,
        }
    }
}

/// A single preference rank. Several candidates may share a rank.
pub type PositionProposal = Vec<CandidateShare>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: Voter,
    pub weight: Weight,
    /// Fallback ranks, rank 0 tried first.
    pub order: Vec<PositionProposal>,
}

impl Vote {
    pub fn new(voter: impl Into<String>, weight: Weight, order: Vec<PositionProposal>) -> Vote {
        Vote {
            voter: voter.into(),
            weight,
            order,
        }
    }

    /// Split off the current rank. `None` once every rank is exhausted.
    pub fn split_head(&self) -> Option<HeadVote> {
        let (head, tail) = self.order.split_first()?;
        Some(HeadVote {
            voter: self.voter.clone(),
            weight: self.weight,
            head: head.clone(),
            tail: tail.to_vec(),
        })
    }
}

/// A vote with a non-empty preference sequence, split into its current rank
/// and the ranks after it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadVote {
    pub voter: Voter,
    pub weight: Weight,
    pub head: PositionProposal,
    pub tail: Vec<PositionProposal>,
}

impl HeadVote {
    pub fn share_for(&self, candidate: &str) -> Option<&CandidateShare> {
        self.head.iter().find(|share| share.candidate == candidate)
    }

    /// Reassemble the full preference sequence, head first.
    pub fn into_vote(self) -> Vote {
        let mut order = Vec::with_capacity(self.tail.len() + 1);
        order.push(self.head);
        order.extend(self.tail);
        Vote {
            voter: self.voter,
            weight: self.weight,
            order,
        }
    }
}

/// A voter's contribution to one candidate in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supporter {
    pub voter: Voter,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWeighted {
    pub candidate: String,
    pub weight: Weight,
    pub supporters: Vec<Supporter>,
}

/// Winners in the order they were declared.
pub type ElectionResult = Vec<CandidateWeighted>;

/// Drop `candidate` from every rank, then drop ranks left empty.
pub fn remove_candidate(candidate: &str, order: &[PositionProposal]) -> Vec<PositionProposal> {
    order
        .iter()
        .map(|rank| {
            rank.iter()
                .filter(|share| share.candidate != candidate)
                .cloned()
                .collect::<PositionProposal>()
        })
        .filter(|rank| !rank.is_empty())
        .collect()
}
