mod last;
mod resolve;
mod validate;

use liquid_vote::input::store::StoreError;
use liquid_vote::input::InputError;
use liquid_vote::reports::ReportError;
use liquid_vote::tabulator::OptionsError;
use std::path::PathBuf;

pub use last::last;
pub use resolve::{resolve, ResolveArgs};
pub use validate::validate;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Invalid options: {0}")]
    Options(#[from] OptionsError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("No input file given and nothing saved in {0}")]
    NoInput(PathBuf),
}

pub type CommandResult<T> = std::result::Result<T, CommandError>;
