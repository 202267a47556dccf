use super::definition::StepId;
use super::history::{RunHistory, SequenceResult};
use crate::error::SnapshotError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// A persisted copy of a run's history, handed to narrative and display code.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub start_step_id: StepId,
    pub results: Vec<SequenceResult>,
    /// `true` when the run reached the end of its sequence.
    pub completed: bool,
}

impl HistorySnapshot {
    pub fn new(start_step_id: StepId, history: &RunHistory, completed: bool) -> Self {
        Self {
            start_step_id,
            results: history.results().to_vec(),
            completed,
        }
    }

    pub fn into_history(self) -> RunHistory {
        RunHistory::from(self.results)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard()).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Saves the snapshot to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|source| SnapshotError::Io {
            path: path.to_string(),
            source,
        })?;
        file.write_all(&bytes).map_err(|source| SnapshotError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Loads a snapshot from a file.
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let mut file = fs::File::open(path).map_err(|source| SnapshotError::Io {
            path: path.to_string(),
            source,
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|source| SnapshotError::Io {
                path: path.to_string(),
                source,
            })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}
