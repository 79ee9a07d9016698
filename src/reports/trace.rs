//! Markdown rendering of tabulations, outcomes and vote sets.

use crate::model::election::{CandidateWeighted, Vote};
use itertools::Itertools;

/// Two-decimal rendering. Exact half-cent ties round away from zero, so
/// `0.125` renders as `0.13` rather than the half-to-even `0.12`.
pub fn fixed2(value: f64) -> String {
    // Only odd multiples of 1/8 sit exactly on a half cent.
    let eighths = value * 8.0;
    let is_tie = value.abs() < 1e12 && eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0;
    if is_tie {
        format!("{:.2}", (value * 100.0).round() / 100.0)
    } else {
        format!("{:.2}", value)
    }
}

pub fn render_result(result: &[CandidateWeighted]) -> String {
    result
        .iter()
        .map(|candidate| format!("- {}", render_candidate_weighted(candidate, None)))
        .join("\n")
}

/// `extra` is appended inside the parentheses after the weight.
pub fn render_candidate_weighted(candidate: &CandidateWeighted, extra: Option<&str>) -> String {
    let supporters: String = candidate
        .supporters
        .iter()
        .map(|supporter| format!("\n  - {} ({})", supporter.voter, fixed2(supporter.weight)))
        .collect();

    format!(
        "{} ({}{}):{}",
        candidate.candidate,
        fixed2(candidate.weight),
        extra.unwrap_or(""),
        supporters
    )
}

pub fn render_votes(votes: &[Vote]) -> String {
    votes
        .iter()
        .map(|vote| format!("- {}", render_vote(vote)))
        .join("\n")
}

pub fn render_vote(vote: &Vote) -> String {
    let ranks: String = vote
        .order
        .iter()
        .map(|rank| {
            let shares = rank
                .iter()
                .map(|share| format!("{} ({}%)", share.candidate, share.percent))
                .join(",");
            format!("\n  - {}", shares)
        })
        .collect();

    format!("{} ({}):{}", vote.voter, fixed2(vote.weight), ranks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::election::{CandidateShare, Supporter};

    #[test]
    fn candidate_with_supporters() {
        let candidate = CandidateWeighted {
            candidate: "A".to_string(),
            weight: 60.0,
            supporters: vec![
                Supporter {
                    voter: "Alisa".to_string(),
                    weight: 50.0,
                },
                Supporter {
                    voter: "Bob".to_string(),
                    weight: 10.0 / 3.0,
                },
            ],
        };
        assert_eq!(
            render_candidate_weighted(&candidate, None),
            "A (60.00):\n  - Alisa (50.00)\n  - Bob (3.33)"
        );
        assert_eq!(
            render_candidate_weighted(&candidate, Some(" ~ 11.00% of 100.00")),
            "A (60.00 ~ 11.00% of 100.00):\n  - Alisa (50.00)\n  - Bob (3.33)"
        );
    }

    #[test]
    fn votes_list_ranks_with_percent() {
        let votes = vec![
            Vote::new(
                "Alisa",
                100.0,
                vec![
                    vec![CandidateShare::new("A", 50.0), CandidateShare::new("B", 50.5)],
                    vec![CandidateShare::new("C", 100.0)],
                ],
            ),
            Vote::new("Bob", 10.0, vec![]),
        ];
        assert_eq!(
            render_votes(&votes),
            "- Alisa (100.00):\n  - A (50%),B (50.5%)\n  - C (100%)\n- Bob (10.00):"
        );
    }

    #[test]
    fn half_cent_ties_round_away_from_zero() {
        assert_eq!(fixed2(0.125), "0.13");
        assert_eq!(fixed2(-0.125), "-0.13");
        assert_eq!(fixed2(2.625), "2.63");
        assert_eq!(fixed2(0.375), "0.38");
        assert_eq!(fixed2(10.0 / 3.0), "3.33");
        assert_eq!(fixed2(1.005), "1.00");
        assert_eq!(fixed2(100.0), "100.00");

        let vote = Vote::new("Alisa", 0.125, vec![]);
        assert_eq!(render_vote(&vote), "Alisa (0.13):");
    }

    #[test]
    fn empty_sets_render_empty() {
        assert_eq!(render_result(&[]), "");
        assert_eq!(render_votes(&[]), "");
    }
}
