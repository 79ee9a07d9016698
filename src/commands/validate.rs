use super::CommandResult;
use colored::*;
use liquid_vote::input::load_votes;
use liquid_vote::reports::trace::fixed2;
use std::collections::BTreeSet;
use std::path::Path;

pub fn validate(input: &Path) -> CommandResult<()> {
    let votes = load_votes(input)?;

    let candidates: BTreeSet<&str> = votes
        .iter()
        .flat_map(|vote| vote.order.iter().flatten())
        .map(|share| share.candidate.as_str())
        .collect();
    let total_weight: f64 = votes.iter().map(|vote| vote.weight).sum();

    println!(
        "✅ {} is valid: {} votes, {} candidates, total weight {}",
        input.display().to_string().bright_cyan(),
        votes.len().to_string().bright_yellow(),
        candidates.len().to_string().bright_yellow(),
        fixed2(total_weight)
    );
    Ok(())
}
