use liquid_vote::tabulator::round::RoundOutcome;
use liquid_vote::{resolve, CandidateShare, PositionProposal, ResolveOptions, Vote};
use proptest::prelude::*;
use std::collections::HashSet;

const CANDIDATES: [&str; 5] = ["A", "B", "C", "D", "E"];

fn share() -> impl Strategy<Value = CandidateShare> {
    (0..CANDIDATES.len(), 1u32..=100).prop_map(|(i, percent)| CandidateShare::new(CANDIDATES[i], percent as f64))
}

fn proposal() -> impl Strategy<Value = PositionProposal> {
    prop::collection::vec(share(), 1..=3)
}

fn vote() -> impl Strategy<Value = Vote> {
    (0u32..6, 1u32..=1000, prop::collection::vec(proposal(), 1..=4))
        .prop_map(|(voter, weight, order)| Vote::new(format!("voter-{}", voter), weight as f64, order))
}

fn electorate() -> impl Strategy<Value = Vec<Vote>> {
    prop::collection::vec(vote(), 1..=6)
}

proptest! {
    #[test]
    fn prop_winners_are_never_repeated(votes in electorate()) {
        let mut resolution = resolve(votes);
        let (_, outcome) = resolution.run_to_end();

        let mut seen = HashSet::new();
        for winner in outcome.result() {
            prop_assert!(seen.insert(winner.candidate.clone()), "{} won twice", winner.candidate);
        }
    }

    #[test]
    fn prop_winners_leave_later_tabulations(votes in electorate()) {
        let mut resolution = resolve(votes);
        resolution.run_to_end();

        let mut elected: HashSet<String> = HashSet::new();
        for record in resolution.rounds() {
            for candidate in &record.ranked {
                prop_assert!(!elected.contains(&candidate.candidate));
            }
            match &record.outcome {
                RoundOutcome::FullConsensus { winner } | RoundOutcome::NewWinner { winner, .. } => {
                    elected.insert(winner.candidate.clone());
                }
                RoundOutcome::Skip | RoundOutcome::Collision { .. } => {}
            }
        }
    }

    #[test]
    fn prop_weight_never_increases(votes in electorate()) {
        let mut resolution = resolve(votes);
        resolution.run_to_end();

        // Exhausted votes drop out, so compare voters by position among survivors.
        for pair in resolution.generations().windows(2) {
            let before: Vec<&Vote> = pair[0].iter().filter(|v| !v.order.is_empty()).collect();
            let after = &pair[1];
            prop_assert_eq!(before.len(), after.len());
            for (old, new) in before.iter().zip(after.iter()) {
                prop_assert_eq!(&old.voter, &new.voter);
                prop_assert!(new.weight <= old.weight);
            }
        }
    }

    #[test]
    fn prop_rounds_classify_consistently(votes in electorate()) {
        let options = ResolveOptions::default();
        let mut resolution = resolve(votes);
        resolution.run_to_end();

        for record in resolution.rounds() {
            match &record.outcome {
                RoundOutcome::FullConsensus { winner } => {
                    prop_assert_eq!(winner, &record.ranked[0]);
                }
                RoundOutcome::NewWinner { winner, winner_optimized, winning_weight_multiplier } => {
                    let opponents = record.opponents.as_ref().unwrap();
                    let minimum = opponents[0].weight + options.winning_margin();
                    prop_assert_eq!(winner_optimized.weight, minimum);
                    prop_assert_eq!(&winner_optimized.candidate, &winner.candidate);
                    if winner.weight > minimum {
                        prop_assert!(*winning_weight_multiplier > 0.0 && *winning_weight_multiplier < 1.0);
                    }
                }
                RoundOutcome::Collision { candidates } => {
                    prop_assert_eq!(candidates[0].weight, candidates[1].weight);
                }
                RoundOutcome::Skip => prop_assert!(record.ranked.is_empty()),
            }
        }
    }

    #[test]
    fn prop_result_only_grows(votes in electorate()) {
        let mut resolution = resolve(votes);
        let mut last_len = 0;
        while let Some(_) = resolution.next() {
            prop_assert!(resolution.result().len() >= last_len);
            last_len = resolution.result().len();
        }
    }
}
