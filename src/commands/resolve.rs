use super::{CommandError, CommandResult};
use colored::*;
use itertools::Itertools;
use liquid_vote::input::store::LastInputStore;
use liquid_vote::input::{load_votes, validate_votes};
use liquid_vote::reports::generator::generate_report;
use liquid_vote::reports::trace::fixed2;
use liquid_vote::reports::{ElectionReport, ReportStatus};
use liquid_vote::ResolveOptions;
use std::path::PathBuf;

pub struct ResolveArgs {
    pub input: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub margin: f64,
    pub tie_tolerance: f64,
    pub state_dir: PathBuf,
    pub save: bool,
}

pub fn resolve(args: ResolveArgs) -> CommandResult<ReportStatus> {
    let store = LastInputStore::new(&args.state_dir);

    let votes = match &args.input {
        Some(path) => {
            let votes = load_votes(path)?;
            if args.save {
                store.save(&votes)?;
            }
            votes
        }
        None => {
            let stored = store
                .load()?
                .ok_or_else(|| CommandError::NoInput(args.state_dir.clone()))?;
            eprintln!(
                "📂 Using input saved at {}",
                stored.saved_at.to_rfc3339().bright_cyan()
            );
            validate_votes(&stored.votes)?;
            stored.votes
        }
    };

    let options = ResolveOptions::new(args.margin, args.tie_tolerance)?;
    let report = generate_report(votes, options);

    println!("{}", report.trace.join("\n"));
    print_summary(&report);

    if let Some(out) = &args.out {
        report.write(out)?;
        eprintln!("📄 Report written to {}", out.display().to_string().bright_green());
    }

    Ok(report.status)
}

fn print_summary(report: &ElectionReport) {
    eprintln!();
    match report.status {
        ReportStatus::Done => eprintln!(
            "✅ Resolved {} votes in {} rounds: {}",
            report.vote_count.to_string().bright_yellow(),
            report.rounds.len().to_string().bright_yellow(),
            report.winners().iter().join(" > ").bright_green().bold()
        ),
        ReportStatus::Collided => {
            let tied = report
                .collision
                .iter()
                .flatten()
                .map(|c| format!("{} ({})", c.candidate, fixed2(c.weight)))
                .join(", ");
            eprintln!(
                "⚠️  Collision after {} rounds between {}",
                report.rounds.len().to_string().bright_yellow(),
                tied.bright_red().bold()
            );
            if !report.result.is_empty() {
                eprintln!(
                    "   Winners so far: {}",
                    report.winners().iter().join(" > ").bright_green()
                );
            }
        }
    }
}
