use super::{tabulate, ResolveOptions};
use crate::model::election::{CandidateWeighted, HeadVote, Supporter};
use serde::{Deserialize, Serialize};

/// Classification of a single round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundOutcome {
    /// Nobody opposes the winner in this rank, so no weight is spent.
    FullConsensus { winner: CandidateWeighted },
    /// The winner is bought with the minimum weight that beats the main opponent.
    NewWinner {
        winner: CandidateWeighted,
        winner_optimized: CandidateWeighted,
        /// Fraction of the winner's weight left unspent.
        winning_weight_multiplier: f64,
    },
    /// Every head rank was empty.
    Skip,
    /// The top two candidates are tied; resolution cannot continue.
    Collision { candidates: Vec<CandidateWeighted> },
}

impl RoundOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            RoundOutcome::FullConsensus { .. } => "FULL_CONSENSUS",
            RoundOutcome::NewWinner { .. } => "NEW_WINNER",
            RoundOutcome::Skip => "SKIP",
            RoundOutcome::Collision { .. } => "COLLISION",
        }
    }
}

/// Tabulations computed while classifying a round, kept for the trace.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResolution {
    pub ranked: Vec<CandidateWeighted>,
    /// Only present when a contest had to be measured.
    pub opponents: Option<Vec<CandidateWeighted>>,
    pub outcome: RoundOutcome,
}

/// Classify one round of head ranks.
pub fn resolve_round(votes: &[HeadVote], options: &ResolveOptions) -> RoundResolution {
    let ranked = tabulate(votes);

    let outcome = match ranked.as_slice() {
        [] => RoundOutcome::Skip,
        [only] => RoundOutcome::FullConsensus {
            winner: only.clone(),
        },
        [first, second, ..] if options.is_tie(first.weight, second.weight) => {
            RoundOutcome::Collision {
                candidates: ranked.clone(),
            }
        }
        [winner, ..] => {
            let opponents = tabulate(
                votes
                    .iter()
                    .filter(|vote| vote.share_for(&winner.candidate).is_none()),
            );

            let outcome = match opponents.first() {
                None => RoundOutcome::FullConsensus {
                    winner: winner.clone(),
                },
                Some(main_opponent) => contest(winner, main_opponent, options),
            };

            return RoundResolution {
                ranked: ranked.clone(),
                opponents: Some(opponents),
                outcome,
            };
        }
    };

    RoundResolution {
        ranked,
        opponents: None,
        outcome,
    }
}

fn contest(
    winner: &CandidateWeighted,
    main_opponent: &CandidateWeighted,
    options: &ResolveOptions,
) -> RoundOutcome {
    let minimum_winning_weight = main_opponent.weight + options.winning_margin();
    let weight_spent_fraction = minimum_winning_weight / winner.weight;
    let winning_weight_multiplier = 1.0 - weight_spent_fraction;

    let supporters = winner
        .supporters
        .iter()
        .map(|supporter| Supporter {
            voter: supporter.voter.clone(),
            weight: supporter.weight - supporter.weight * winning_weight_multiplier,
        })
        .collect();

    RoundOutcome::NewWinner {
        winner: winner.clone(),
        winner_optimized: CandidateWeighted {
            candidate: winner.candidate.clone(),
            weight: minimum_winning_weight,
            supporters,
        },
        winning_weight_multiplier,
    }
}
