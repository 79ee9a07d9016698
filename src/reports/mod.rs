use crate::model::election::{CandidateWeighted, ElectionResult, Vote};
use crate::resolution::RoundRecord;
use crate::tabulator::ResolveOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod generator;
pub mod trace;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Done,
    Collided,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    pub winning_margin: f64,
    pub tie_tolerance: f64,
}

impl From<ResolveOptions> for ReportOptions {
    fn from(options: ResolveOptions) -> Self {
        Self {
            winning_margin: options.winning_margin(),
            tie_tolerance: options.tie_tolerance(),
        }
    }
}

/// Full record of one resolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionReport {
    pub status: ReportStatus,
    pub options: ReportOptions,
    #[serde(rename = "voteCount")]
    pub vote_count: usize,
    pub rounds: Vec<RoundRecord>,
    pub result: ElectionResult,
    pub satisfied: Vec<Vote>,
    /// Tied candidates, only when the run collided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision: Option<Vec<CandidateWeighted>>,
    /// Unconsumed votes, only when the run collided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Vec<Vote>>,
    pub trace: Vec<String>,
}

impl ElectionReport {
    pub fn winners(&self) -> Vec<&str> {
        self.result.iter().map(|c| c.candidate.as_str()).collect()
    }

    pub fn write(&self, path: &Path) -> ReportResult<()> {
        crate::util::write_serialized(path, self)?;
        Ok(())
    }
}
