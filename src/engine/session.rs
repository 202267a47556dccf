use super::{DiscardReason, Effect, EventId, RunEvent, RunState, SpinEvent};
use crate::error::SelectionError;
use crate::selector::weights::DEFAULT_WEIGHT_BUDGET;
use crate::sequence::{HistorySnapshot, RunHistory, Sequence, SpinResult, StepId};
use crate::source::SpinSource;
use chrono::Utc;
use std::mem;

pub struct SessionBuilder {
    sequence: Sequence,
    weight_budget: f64,
}

impl SessionBuilder {
    pub fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            weight_budget: DEFAULT_WEIGHT_BUDGET,
        }
    }

    /// Budget that unnamed segments split when a branch overrides weights.
    pub fn with_weight_budget(mut self, weight_budget: f64) -> Self {
        self.weight_budget = weight_budget;
        self
    }

    pub fn build(self) -> SpinSession {
        SpinSession {
            sequence: self.sequence,
            state: RunState::new(self.weight_budget),
            next_event_id: 1,
        }
    }
}

/// Owns a sequence and the single mutable run over it.
///
/// The session stamps event ids and timestamps on spins it records itself. Hosts
/// that receive spins from elsewhere (and may see them twice) should issue an id
/// when the spin is triggered and pass it back through `dispatch`.
pub struct SpinSession {
    sequence: Sequence,
    state: RunState,
    next_event_id: u64,
}

impl SpinSession {
    pub fn new(sequence: Sequence) -> Self {
        SessionBuilder::new(sequence).build()
    }

    pub fn builder(sequence: Sequence) -> SessionBuilder {
        SessionBuilder::new(sequence)
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn history(&self) -> &RunHistory {
        self.state.history()
    }

    /// Hands out the next event id for a spin the host is about to trigger.
    pub fn issue_event_id(&mut self) -> EventId {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        id
    }

    /// Feeds one event through the run state machine.
    pub fn dispatch(&mut self, event: RunEvent) -> Vec<Effect> {
        let state = mem::take(&mut self.state);
        let (state, effects) = state.apply(&self.sequence, event);
        self.state = state;
        effects
    }

    pub fn start(&mut self) -> Vec<Effect> {
        self.dispatch(RunEvent::Start)
    }

    pub fn reset(&mut self) -> Vec<Effect> {
        self.dispatch(RunEvent::Reset)
    }

    /// Records an outcome spun for `step_id` under a fresh event id.
    ///
    /// The step id is the one the spin was triggered for, not whatever step is
    /// current when the outcome arrives, so a repeated delivery after the run has
    /// moved on is discarded instead of being recorded against the next step.
    pub fn record_spin(&mut self, step_id: impl Into<StepId>, outcome: SpinResult) -> Vec<Effect> {
        let event_id = self.issue_event_id();
        self.dispatch(RunEvent::Spin(SpinEvent {
            event_id,
            step_id: step_id.into(),
            outcome,
            timestamp: Utc::now(),
        }))
    }

    /// Spins the current step's wheel with `source` and records the outcome.
    pub fn spin_with<S: SpinSource>(&mut self, source: &mut S) -> Result<Vec<Effect>, SelectionError> {
        let (Some(step_id), Some(wheel)) =
            (self.state.current_step_id(), self.state.current_wheel())
        else {
            let event_id = self.issue_event_id();
            return Ok(vec![Effect::Discarded(DiscardReason::NotRunning { event_id })]);
        };
        let step_id = step_id.to_string();
        let outcome = source.spin(wheel)?;
        Ok(self.record_spin(step_id, outcome))
    }

    /// Starts the run if needed and spins until the sequence completes or
    /// `max_spins` spins have been made. Returns whether the sequence completed.
    pub fn run_to_completion<S: SpinSource>(
        &mut self,
        source: &mut S,
        max_spins: usize,
    ) -> Result<bool, SelectionError> {
        if self.state.current_step_id().is_none() && !self.state.is_complete() {
            self.start();
        }
        for _ in 0..max_spins {
            if self.state.is_complete() {
                break;
            }
            self.spin_with(source)?;
        }
        if !self.state.is_complete() {
            log::warn!("Run stopped after {} spins without completing", max_spins);
        }
        Ok(self.state.is_complete())
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::new(
            self.sequence.start_step_id.clone(),
            self.state.history(),
            self.state.is_complete(),
        )
    }
}
