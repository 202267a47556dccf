//! Multi-spin orchestration.
//!
//! A step may ask for several physical spins before it produces a result. The
//! orchestrator buffers raw outcomes for such a step and folds them into exactly
//! one `SequenceResult`, regardless of how many spins happened. It never drives
//! the wheel itself: it only reacts to spins the caller reports.

use crate::sequence::{RunHistory, SequenceResult, SpinResult, Step, StepId, StepKind};
use chrono::{DateTime, Utc};
use std::mem;

pub mod count;

pub use count::{MAX_SPIN_COUNT, decode_spin_count, resolve_spin_count};

/// An in-flight multi-spin session. Holds the parameters it started with.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectingSession {
    pub step_id: StepId,
    pub current_count: u8,
    pub total_count: u8,
    pub results: Vec<SpinResult>,
    pub aggregate_results: bool,
}

/// Transient runtime state of the orchestrator. Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MultiSpinState {
    #[default]
    Idle,
    Collecting(CollectingSession),
}

/// What happened to a raw spin outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinDisposition {
    /// Buffered; the step needs more spins.
    Pending {
        step_id: StepId,
        current: u8,
        total: u8,
    },
    /// The step produced its logical result.
    Complete(SequenceResult),
}

#[derive(Debug, Clone, Default)]
pub struct MultiSpinOrchestrator {
    state: MultiSpinState,
}

impl MultiSpinOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MultiSpinState {
        &self.state
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, MultiSpinState::Collecting(_))
    }

    /// The step an in-flight session belongs to.
    pub fn collecting_step(&self) -> Option<&str> {
        match &self.state {
            MultiSpinState::Collecting(session) => Some(&session.step_id),
            MultiSpinState::Idle => None,
        }
    }

    /// Drops any in-flight session.
    pub fn reset(&mut self) {
        self.state = MultiSpinState::Idle;
    }

    /// Feeds one raw spin outcome for `step`.
    pub fn receive(
        &mut self,
        step: &Step,
        outcome: SpinResult,
        history: &RunHistory,
        timestamp: DateTime<Utc>,
    ) -> SpinDisposition {
        match mem::take(&mut self.state) {
            MultiSpinState::Collecting(session) if session.step_id == step.id => {
                self.collect(session, outcome, timestamp)
            }
            MultiSpinState::Collecting(session) => {
                log::warn!(
                    "Abandoning multi-spin session for '{}' ({}/{} spins), outcome arrived for '{}'",
                    session.step_id,
                    session.current_count,
                    session.total_count,
                    step.id
                );
                self.start(step, outcome, history, timestamp)
            }
            MultiSpinState::Idle => self.start(step, outcome, history, timestamp),
        }
    }

    fn start(
        &mut self,
        step: &Step,
        outcome: SpinResult,
        history: &RunHistory,
        timestamp: DateTime<Utc>,
    ) -> SpinDisposition {
        let aggregate_results = match &step.kind {
            StepKind::MultiSpinFixed {
                aggregate_results, ..
            }
            | StepKind::MultiSpinDynamic {
                aggregate_results, ..
            } => *aggregate_results,
            StepKind::Normal | StepKind::Determiner => false,
        };

        let total_count = resolve_spin_count(&step.kind, history);
        if total_count <= 1 {
            return SpinDisposition::Complete(SequenceResult {
                step_id: step.id.clone(),
                spin_result: outcome,
                timestamp,
                multi_spin_results: None,
            });
        }

        log::info!(
            "Step '{}' collecting {} spins ({} mode)",
            step.id,
            total_count,
            if aggregate_results { "aggregate" } else { "override" }
        );
        self.state = MultiSpinState::Collecting(CollectingSession {
            step_id: step.id.clone(),
            current_count: 1,
            total_count,
            results: vec![outcome],
            aggregate_results,
        });
        SpinDisposition::Pending {
            step_id: step.id.clone(),
            current: 1,
            total: total_count,
        }
    }

    fn collect(
        &mut self,
        mut session: CollectingSession,
        outcome: SpinResult,
        timestamp: DateTime<Utc>,
    ) -> SpinDisposition {
        session.current_count += 1;

        if session.current_count < session.total_count {
            session.results.push(outcome);
            let disposition = SpinDisposition::Pending {
                step_id: session.step_id.clone(),
                current: session.current_count,
                total: session.total_count,
            };
            self.state = MultiSpinState::Collecting(session);
            return disposition;
        }

        // State is already Idle: mem::take left the default behind.
        SpinDisposition::Complete(Self::fold(session, outcome, timestamp))
    }

    /// Folds a finished session and its final spin into one logical result.
    fn fold(session: CollectingSession, last: SpinResult, timestamp: DateTime<Utc>) -> SequenceResult {
        let CollectingSession {
            step_id,
            mut results,
            aggregate_results,
            ..
        } = session;

        if aggregate_results {
            let first = results.first().cloned().unwrap_or_else(|| last.clone());
            results.push(last);
            SequenceResult {
                step_id,
                spin_result: first,
                timestamp,
                multi_spin_results: Some(results),
            }
        } else {
            SequenceResult {
                step_id,
                spin_result: last,
                timestamp,
                multi_spin_results: None,
            }
        }
    }
}
