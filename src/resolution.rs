//! Round-by-round election driver.
//!
//! [`resolve`] returns a [`Resolution`], an iterator that computes one round
//! each time its buffered trace runs dry. Dropping it early is always safe:
//! every generation of votes is a fresh value and nothing outside the iterator
//! is touched.

use crate::model::election::{remove_candidate, CandidateWeighted, ElectionResult, HeadVote, Vote};
use crate::reports::trace::{fixed2, render_candidate_weighted, render_result, render_votes};
use crate::tabulator::round::{resolve_round, RoundOutcome};
use crate::tabulator::ResolveOptions;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// One element of the lazy resolution sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionEvent {
    /// Human-readable trace line (markdown).
    Trace(String),
    /// Terminal element. Nothing follows it.
    Finished(Outcome),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every preference sequence was exhausted.
    Done {
        result: ElectionResult,
        satisfied: Vec<Vote>,
    },
    /// Two candidates tied for first place and resolution stopped.
    Collided {
        candidates: Vec<CandidateWeighted>,
        result: ElectionResult,
        satisfied: Vec<Vote>,
        remaining: Vec<Vote>,
    },
}

impl Outcome {
    pub fn result(&self) -> &ElectionResult {
        match self {
            Outcome::Done { result, .. } | Outcome::Collided { result, .. } => result,
        }
    }

    pub fn satisfied(&self) -> &[Vote] {
        match self {
            Outcome::Done { satisfied, .. } | Outcome::Collided { satisfied, .. } => satisfied,
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, Outcome::Collided { .. })
    }
}

/// Audit record of one resolved round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: usize,
    pub ranked: Vec<CandidateWeighted>,
    pub opponents: Option<Vec<CandidateWeighted>>,
    pub outcome: RoundOutcome,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Running,
    /// The final round has been computed; its events may still be buffered.
    Finished(Outcome),
}

pub struct Resolution {
    options: ResolveOptions,
    state: State,
    next_votes: Vec<Vote>,
    satisfied: Vec<Vote>,
    total_result: ElectionResult,
    generations: Vec<Vec<Vote>>,
    rounds: Vec<RoundRecord>,
    pending: VecDeque<ResolutionEvent>,
}

/// Resolve with the default margin and exact tie detection.
pub fn resolve(votes: Vec<Vote>) -> Resolution {
    resolve_with(votes, ResolveOptions::default())
}

pub fn resolve_with(votes: Vec<Vote>, options: ResolveOptions) -> Resolution {
    Resolution {
        options,
        state: State::Running,
        generations: vec![votes.clone()],
        next_votes: votes,
        satisfied: Vec::new(),
        total_result: Vec::new(),
        rounds: Vec::new(),
        pending: VecDeque::new(),
    }
}

impl Resolution {
    /// Winners declared so far.
    pub fn result(&self) -> &ElectionResult {
        &self.total_result
    }

    pub fn satisfied(&self) -> &[Vote] {
        &self.satisfied
    }

    /// Every vote generation seen so far, the input first.
    pub fn generations(&self) -> &[Vec<Vote>] {
        &self.generations
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// True once the terminal [`ResolutionEvent::Finished`] has been pulled.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished(_)) && self.pending.is_empty()
    }

    /// The outcome, as soon as the final round has been computed.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            State::Finished(outcome) => Some(outcome),
            State::Running => None,
        }
    }

    /// Drain the remaining sequence, returning its trace lines and the outcome.
    pub fn run_to_end(&mut self) -> (Vec<String>, Outcome) {
        let mut trace = Vec::new();
        loop {
            while let Some(event) = self.pending.pop_front() {
                if let ResolutionEvent::Trace(line) = event {
                    trace.push(line);
                }
            }
            if let State::Finished(outcome) = &self.state {
                return (trace, outcome.clone());
            }
            self.step();
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.pending.push_back(ResolutionEvent::Finished(outcome.clone()));
        self.state = State::Finished(outcome);
    }

    fn emit(&mut self, line: String) {
        self.pending.push_back(ResolutionEvent::Trace(line));
    }

    fn step(&mut self) {
        let mut active: Vec<HeadVote> = Vec::new();
        for vote in &self.next_votes {
            match vote.split_head() {
                Some(head) => active.push(head),
                None => self.satisfied.push(vote.clone()),
            }
        }

        if active.is_empty() {
            self.finish_done();
            return;
        }

        let round = self.rounds.len() + 1;
        debug!(round, active = active.len(), "round started");
        let started = format!("# ROUND STARTED\n\n{}\n\n---", render_votes(&self.next_votes));
        self.emit(started);

        let resolution = resolve_round(&active, &self.options);
        self.emit(format!(
            "# Candidates Sorted: \n\n{}\n\n---",
            render_result(&resolution.ranked)
        ));
        if let Some(opponents) = resolution.opponents.as_ref().filter(|o| !o.is_empty()) {
            self.emit(format!(
                "# Opponents Sorted: \n\n{}\n\n---",
                render_result(opponents)
            ));
        }

        let outcome = resolution.outcome.clone();
        self.rounds.push(RoundRecord {
            round,
            ranked: resolution.ranked,
            opponents: resolution.opponents,
            outcome: resolution.outcome,
        });

        match outcome {
            RoundOutcome::FullConsensus { winner } => {
                info!(round, candidate = %winner.candidate, weight = winner.weight, "full consensus");
                self.emit(format!(
                    "# FULL_CONSENSUS:\n\n{}\n\n---",
                    render_candidate_weighted(&winner, None)
                ));
                self.advance(
                    active
                        .into_iter()
                        .map(|vote| Vote {
                            order: remove_candidate(&winner.candidate, &vote.tail),
                            voter: vote.voter,
                            weight: vote.weight,
                        })
                        .collect(),
                );
                self.total_result.push(winner);
            }
            RoundOutcome::Skip => {
                debug!(round, "skip");
                self.emit("# SKIP\n\n---".to_string());
                self.advance(
                    active
                        .into_iter()
                        .map(|vote| Vote {
                            order: vote.tail,
                            voter: vote.voter,
                            weight: vote.weight,
                        })
                        .collect(),
                );
            }
            RoundOutcome::NewWinner {
                winner,
                winner_optimized,
                winning_weight_multiplier,
            } => {
                info!(
                    round,
                    candidate = %winner.candidate,
                    weight = winner_optimized.weight,
                    multiplier = winning_weight_multiplier,
                    "new winner"
                );
                let extra = format!(
                    " ~ {}% of {}",
                    fixed2((1.0 - winning_weight_multiplier) * 100.0),
                    fixed2(winner.weight)
                );
                self.emit(format!(
                    "# WINNER:\n\n{}\n\n---",
                    render_candidate_weighted(&winner_optimized, Some(&extra))
                ));
                let spent_fraction = 1.0 - winning_weight_multiplier;
                self.advance(
                    active
                        .into_iter()
                        .map(|vote| spend_support(vote, &winner.candidate, spent_fraction))
                        .collect(),
                );
                self.total_result.push(winner_optimized);
            }
            RoundOutcome::Collision { candidates } => {
                warn!(round, tied = candidates.len(), "collision");
                let remaining: Vec<Vote> = active.into_iter().map(HeadVote::into_vote).collect();
                self.emit(format!("# COLLISION:\n\n{}\n\n---", render_result(&candidates)));
                self.emit(format!(
                    "Accumulated Result:\n\n{}\n---",
                    render_result(&self.total_result)
                ));
                self.emit(format!("Satisfied voters:\n\n{}", render_votes(&self.satisfied)));
                self.emit(format!("Remaining votes:\n\n{}", render_votes(&remaining)));
                self.finish(Outcome::Collided {
                    candidates,
                    result: self.total_result.clone(),
                    satisfied: self.satisfied.clone(),
                    remaining,
                });
            }
        }
    }

    fn advance(&mut self, votes: Vec<Vote>) {
        self.generations.push(votes.clone());
        self.next_votes = votes;
    }

    fn finish_done(&mut self) {
        info!(
            winners = self.total_result.len(),
            satisfied = self.satisfied.len(),
            "resolution done"
        );
        self.emit("# DONE!".to_string());
        self.emit(format!("Result:\n\n{}\n---", render_result(&self.total_result)));
        self.emit(format!("Satisfied weight:\n\n{}", render_votes(&self.satisfied)));
        self.finish(Outcome::Done {
            result: self.total_result.clone(),
            satisfied: self.satisfied.clone(),
        });
    }
}

/// Rewrite a vote after `candidate` won at the cost of `spent_fraction` of its
/// supporters' allocated weight.
fn spend_support(vote: HeadVote, candidate: &str, spent_fraction: f64) -> Vote {
    match vote.share_for(candidate).map(|share| share.percent) {
        Some(percent) => Vote {
            weight: vote.weight - vote.weight * (percent / 100.0) * spent_fraction,
            order: remove_candidate(candidate, &vote.tail),
            voter: vote.voter,
        },
        None => {
            let full = vote.into_vote();
            Vote {
                order: remove_candidate(candidate, &full.order),
                ..full
            }
        }
    }
}

impl Iterator for Resolution {
    type Item = ResolutionEvent;

    fn next(&mut self) -> Option<ResolutionEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if let State::Finished(_) = self.state {
                return None;
            }
            self.step();
        }
    }
}
