use super::definition::{Segment, StepId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw spin outcome: the landed segment and its position on the wheel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpinResult {
    pub segment_index: usize,
    pub segment: Segment,
}

impl SpinResult {
    pub fn new(segment_index: usize, segment: Segment) -> Self {
        Self {
            segment_index,
            segment,
        }
    }

    pub fn segment_id(&self) -> &str {
        &self.segment.id
    }
}

/// One completed step visit in run history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SequenceResult {
    pub step_id: StepId,
    /// The logical choice. For multi-spin steps this is the first (aggregate)
    /// or last (override) spin.
    pub spin_result: SpinResult,
    pub timestamp: DateTime<Utc>,
    /// Every individual spin, kept only for multi-spin steps in aggregate mode.
    pub multi_spin_results: Option<Vec<SpinResult>>,
}

/// Append-only, ordered record of a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RunHistory {
    results: Vec<SequenceResult>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, result: SequenceResult) {
        self.results.push(result);
    }

    pub(crate) fn clear(&mut self) {
        self.results.clear();
    }

    /// Most recent result recorded for a step, if it has been visited.
    pub fn latest_for(&self, step_id: &str) -> Option<&SequenceResult> {
        self.results.iter().rev().find(|r| r.step_id == step_id)
    }

    pub fn results(&self) -> &[SequenceResult] {
        &self.results
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn last(&self) -> Option<&SequenceResult> {
        self.results.last()
    }
}

impl From<Vec<SequenceResult>> for RunHistory {
    fn from(results: Vec<SequenceResult>) -> Self {
        Self { results }
    }
}
