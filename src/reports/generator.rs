use super::{ElectionReport, ReportStatus};
use crate::model::election::Vote;
use crate::resolution::{resolve_with, Outcome};
use crate::tabulator::ResolveOptions;

/// Run a resolution to its end and collect everything it produced.
pub fn generate_report(votes: Vec<Vote>, options: ResolveOptions) -> ElectionReport {
    let vote_count = votes.len();
    let mut resolution = resolve_with(votes, options);
    let (trace, outcome) = resolution.run_to_end();
    let rounds = resolution.rounds().to_vec();

    match outcome {
        Outcome::Done { result, satisfied } => ElectionReport {
            status: ReportStatus::Done,
            options: options.into(),
            vote_count,
            rounds,
            result,
            satisfied,
            collision: None,
            remaining: None,
            trace,
        },
        Outcome::Collided {
            candidates,
            result,
            satisfied,
            remaining,
        } => ElectionReport {
            status: ReportStatus::Collided,
            options: options.into(),
            vote_count,
            rounds,
            result,
            satisfied,
            collision: Some(candidates),
            remaining: Some(remaining),
            trace,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::election::CandidateShare;

    #[test]
    fn collided_report_carries_diagnostics() {
        let votes = vec![
            Vote::new("A", 50.0, vec![vec![CandidateShare::new("X", 100.0)]]),
            Vote::new("B", 50.0, vec![vec![CandidateShare::new("Y", 100.0)]]),
        ];
        let report = generate_report(votes, ResolveOptions::default());

        assert_eq!(report.status, ReportStatus::Collided);
        assert_eq!(report.vote_count, 2);
        assert_eq!(report.rounds.len(), 1);
        assert!(report.result.is_empty());
        assert_eq!(report.collision.as_ref().map(Vec::len), Some(2));
        assert_eq!(report.remaining.as_ref().map(Vec::len), Some(2));
        assert_eq!(report.trace.last().map(|l| l.starts_with("Remaining votes:")), Some(true));
    }

    #[test]
    fn done_report_serializes_without_collision_fields() {
        let votes = vec![Vote::new("A", 100.0, vec![vec![CandidateShare::new("X", 100.0)]])];
        let report = generate_report(votes, ResolveOptions::default());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "done");
        assert_eq!(json["voteCount"], 1);
        assert_eq!(json["options"]["winningMargin"], 1.0);
        assert_eq!(json["rounds"][0]["outcome"]["type"], "FULL_CONSENSUS");
        assert!(json.get("collision").is_none());
        assert_eq!(report.winners(), vec!["X"]);
    }
}
