mod commands;

use crate::commands::{last, resolve, validate, ResolveArgs};
use clap::{Parser, Subcommand};
use liquid_vote::reports::ReportStatus;
use std::path::PathBuf;

const DEFAULT_STATE_DIR: &str = ".liquid-vote";

#[derive(Parser)]
#[clap(about = "Resolve liquid ranked-vote elections")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an election and print its trace.
    Resolve {
        /// Votes JSON file. Falls back to the last saved input when omitted.
        input: Option<PathBuf>,
        /// Write a JSON report to this path
        #[clap(long)]
        out: Option<PathBuf>,
        /// Weight added to the main opponent to get the minimum winning weight
        #[clap(long, default_value = "1")]
        margin: f64,
        /// Top-two weights this close are treated as a collision
        #[clap(long, default_value = "0")]
        tie_tolerance: f64,
        /// Directory holding the last-input slot
        #[clap(long, default_value = DEFAULT_STATE_DIR)]
        state_dir: PathBuf,
        /// Do not overwrite the last-input slot
        #[clap(long)]
        no_save: bool,
    },
    /// Validate a votes file without resolving it.
    Validate {
        /// Votes JSON file
        input: PathBuf,
    },
    /// Print the last saved input.
    Last {
        /// Directory holding the last-input slot
        #[clap(long, default_value = DEFAULT_STATE_DIR)]
        state_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let outcome = match opts.command {
        Command::Resolve {
            input,
            out,
            margin,
            tie_tolerance,
            state_dir,
            no_save,
        } => resolve(ResolveArgs {
            input,
            out,
            margin,
            tie_tolerance,
            state_dir,
            save: !no_save,
        })
        .map(|status| status == ReportStatus::Collided),
        Command::Validate { input } => validate(&input).map(|_| false),
        Command::Last { state_dir } => last(&state_dir).map(|_| false),
    };

    match outcome {
        Ok(false) => {}
        Ok(true) => std::process::exit(2),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
