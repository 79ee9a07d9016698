//! Liquid ranked-vote resolution.
//!
//! Voters split their weight across several candidates per rank. Each round
//! elects the strongest candidate using only the weight needed to beat the
//! main opponent; the surplus stays with the voters for later rounds.

pub mod input;
pub mod model;
pub mod reports;
pub mod resolution;
pub mod tabulator;
pub mod util;

pub use model::election::{CandidateShare, CandidateWeighted, ElectionResult, PositionProposal, Vote};
pub use resolution::{resolve, resolve_with, Outcome, Resolution, ResolutionEvent};
pub use tabulator::{OptionsError, ResolveOptions};
