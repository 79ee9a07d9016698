use crate::model::election::Vote;
use crate::util::write_serialized;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Slot name the last submitted input is stored under.
pub const LAST_INPUT_KEY: &str = "electionInput";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Stored input at {path} is not valid: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredInput {
    pub saved_at: DateTime<Utc>,
    pub votes: Vec<Vote>,
}

/// Single-slot store for the most recently submitted votes.
pub struct LastInputStore {
    dir: PathBuf,
}

impl LastInputStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", LAST_INPUT_KEY))
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> StoreResult<Option<StoredInput>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Overwrite the slot with `votes`.
    pub fn save(&self, votes: &[Vote]) -> StoreResult<StoredInput> {
        let stored = StoredInput {
            saved_at: Utc::now(),
            votes: votes.to_vec(),
        };
        let path = self.path();
        write_serialized(&path, &stored).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(stored)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::election::CandidateShare;

    fn sample(voter: &str) -> Vec<Vote> {
        vec![Vote::new(voter, 100.0, vec![vec![CandidateShare::new("A", 100.0)]])]
    }

    #[test]
    fn empty_slot_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LastInputStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_overwrites_previous_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = LastInputStore::new(dir.path().join("state"));

        store.save(&sample("Alisa")).unwrap();
        store.save(&sample("Bob")).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.votes, sample("Bob"));
        assert!(store.path().ends_with("electionInput.json"));
    }

    #[test]
    fn corrupt_slot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LastInputStore::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().starts_with("Stored input at"));
    }

    #[test]
    fn unreadable_slot_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LastInputStore::new(dir.path());
        std::fs::create_dir(store.path()).unwrap();
        assert!(matches!(store.load(), Err(StoreError::Io { .. })));
    }
}
