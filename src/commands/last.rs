use super::{CommandError, CommandResult};
use colored::*;
use liquid_vote::input::store::LastInputStore;
use liquid_vote::reports::trace::render_votes;
use std::path::Path;

pub fn last(state_dir: &Path) -> CommandResult<()> {
    let store = LastInputStore::new(state_dir);
    let stored = store
        .load()?
        .ok_or_else(|| CommandError::NoInput(store.dir().to_path_buf()))?;

    println!(
        "📂 Saved at {} ({})",
        stored.saved_at.to_rfc3339().bright_cyan(),
        store.path().display()
    );
    println!("{}", render_votes(&stored.votes));
    Ok(())
}
