//! The run engine.
//!
//! A run is a pure state machine: `RunState::apply` takes the current state and one
//! event and returns the next state plus the effects the host should act on. There
//! is no ambient state, so the host decides where the single mutable instance
//! lives (see `SpinSession`, or the `actor` module for async hosts).

use crate::orchestrator::{MultiSpinOrchestrator, MultiSpinState, SpinDisposition};
use crate::resolver::{BranchResolver, Transition};
use crate::selector::weights::{DEFAULT_WEIGHT_BUDGET, apply_weight_overrides};
use crate::sequence::{RunHistory, SequenceResult, Sequence, SpinResult, StepId, WeightOverride, Wheel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod session;

pub use session::{SessionBuilder, SpinSession};

/// Monotonic id attached to every spin event, used to drop duplicate deliveries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw spin outcome reported for a step.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinEvent {
    pub event_id: EventId,
    pub step_id: StepId,
    pub outcome: SpinResult,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Enters the sequence's start step.
    Start,
    Spin(SpinEvent),
    /// Aborts the run, dropping history and any in-flight multi-spin session.
    Reset,
}

/// Why an event was dropped without changing the run.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscardReason {
    /// `Start` on a run that is already running or finished.
    AlreadyStarted,
    /// A spin arrived while no step is current.
    NotRunning { event_id: EventId },
    /// The event id was already processed, or is older than one that was.
    Duplicate { event_id: EventId, last: EventId },
    /// The spin targets a step other than the current one.
    WrongStep {
        event_id: EventId,
        step_id: StepId,
        current: StepId,
    },
    /// The landed segment is not on the current step's wheel at that index.
    ForeignOutcome {
        event_id: EventId,
        step_id: StepId,
        segment_id: String,
    },
}

/// Something the host should react to after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A step became current. `wheel` already has branch overrides applied.
    StepEntered { step_id: StepId, wheel: Wheel },
    /// A multi-spin step buffered a spin and awaits the next one.
    SpinRecorded { step_id: StepId, current: u8, total: u8 },
    /// A step produced its result and the resolver chose where to go.
    StepCompleted {
        result: SequenceResult,
        transition: Transition,
    },
    SequenceCompleted,
    RunReset,
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunStatus {
    #[default]
    NotStarted,
    Active {
        step_id: StepId,
        wheel: Wheel,
    },
    Completed,
}

/// The complete state of one run.
#[derive(Debug, Clone)]
pub struct RunState {
    status: RunStatus,
    history: RunHistory,
    orchestrator: MultiSpinOrchestrator,
    last_event_id: Option<EventId>,
    weight_budget: f64,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_BUDGET)
    }
}

impl RunState {
    pub fn new(weight_budget: f64) -> Self {
        Self {
            status: RunStatus::NotStarted,
            history: RunHistory::new(),
            orchestrator: MultiSpinOrchestrator::new(),
            last_event_id: None,
            weight_budget,
        }
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    pub fn multi_spin_state(&self) -> &MultiSpinState {
        self.orchestrator.state()
    }

    pub fn last_event_id(&self) -> Option<EventId> {
        self.last_event_id
    }

    pub fn weight_budget(&self) -> f64 {
        self.weight_budget
    }

    pub fn current_step_id(&self) -> Option<&str> {
        match &self.status {
            RunStatus::Active { step_id, .. } => Some(step_id),
            _ => None,
        }
    }

    /// The wheel the current step spins, with any branch overrides applied.
    pub fn current_wheel(&self) -> Option<&Wheel> {
        match &self.status {
            RunStatus::Active { wheel, .. } => Some(wheel),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Processes one event to completion.
    pub fn apply(mut self, sequence: &Sequence, event: RunEvent) -> (RunState, Vec<Effect>) {
        let mut effects = Vec::new();
        match event {
            RunEvent::Start => self.start(sequence, &mut effects),
            RunEvent::Spin(spin) => self.spin(sequence, spin, &mut effects),
            RunEvent::Reset => {
                self.status = RunStatus::NotStarted;
                self.history.clear();
                self.orchestrator.reset();
                log::info!("Run reset");
                effects.push(Effect::RunReset);
            }
        }
        (self, effects)
    }

    fn start(&mut self, sequence: &Sequence, effects: &mut Vec<Effect>) {
        if self.status != RunStatus::NotStarted {
            effects.push(Effect::Discarded(DiscardReason::AlreadyStarted));
            return;
        }
        log::info!("Starting run at step '{}'", sequence.start_step_id);
        self.enter(sequence, Some(&sequence.start_step_id), &[], effects);
    }

    fn spin(&mut self, sequence: &Sequence, spin: SpinEvent, effects: &mut Vec<Effect>) {
        let SpinEvent {
            event_id,
            step_id,
            outcome,
            timestamp,
        } = spin;

        if let Some(last) = self.last_event_id.filter(|last| event_id <= *last) {
            log::debug!("Dropping duplicate spin event {} (last {})", event_id, last);
            effects.push(Effect::Discarded(DiscardReason::Duplicate { event_id, last }));
            return;
        }

        let Some(current) = self.current_step_id().map(str::to_string) else {
            effects.push(Effect::Discarded(DiscardReason::NotRunning { event_id }));
            return;
        };
        if step_id != current {
            log::debug!(
                "Dropping spin event {} for '{}', current step is '{}'",
                event_id,
                step_id,
                current
            );
            effects.push(Effect::Discarded(DiscardReason::WrongStep {
                event_id,
                step_id,
                current,
            }));
            return;
        }
        let on_wheel = self.current_wheel().is_some_and(|wheel| {
            wheel
                .segments
                .get(outcome.segment_index)
                .is_some_and(|s| s.id == outcome.segment.id)
        });
        if !on_wheel {
            log::debug!(
                "Dropping spin event {}: segment '{}' at #{} is not on the wheel of '{}'",
                event_id,
                outcome.segment.id,
                outcome.segment_index,
                current
            );
            effects.push(Effect::Discarded(DiscardReason::ForeignOutcome {
                event_id,
                step_id: current,
                segment_id: outcome.segment.id,
            }));
            return;
        }
        self.last_event_id = Some(event_id);

        let Some(step) = sequence.step(&current) else {
            log::warn!(
                "Current step '{}' is no longer in the sequence, ending the run",
                current
            );
            self.finish(effects);
            return;
        };

        match self
            .orchestrator
            .receive(step, outcome, &self.history, timestamp)
        {
            SpinDisposition::Pending {
                step_id,
                current,
                total,
            } => effects.push(Effect::SpinRecorded {
                step_id,
                current,
                total,
            }),
            SpinDisposition::Complete(result) => {
                self.history.push(result.clone());
                let transition = BranchResolver::new(sequence).resolve(step, &self.history);
                log::info!(
                    "Step '{}' landed on '{}': {}",
                    step.id,
                    result.spin_result.segment_id(),
                    transition.reason
                );
                let next = transition.next_step_id.clone();
                let overrides = transition.weight_overrides.clone();
                effects.push(Effect::StepCompleted { result, transition });
                self.enter(sequence, next.as_deref(), &overrides, effects);
            }
        }
    }

    fn enter(
        &mut self,
        sequence: &Sequence,
        step_id: Option<&str>,
        overrides: &[WeightOverride],
        effects: &mut Vec<Effect>,
    ) {
        let Some(step) = step_id.and_then(|id| sequence.step(id)) else {
            self.finish(effects);
            return;
        };

        let wheel = Wheel::new(apply_weight_overrides(
            &step.wheel.segments,
            overrides,
            self.weight_budget,
        ));
        self.status = RunStatus::Active {
            step_id: step.id.clone(),
            wheel: wheel.clone(),
        };
        effects.push(Effect::StepEntered {
            step_id: step.id.clone(),
            wheel,
        });
    }

    fn finish(&mut self, effects: &mut Vec<Effect>) {
        self.status = RunStatus::Completed;
        self.orchestrator.reset();
        log::info!("Sequence complete after {} steps", self.history.len());
        effects.push(Effect::SequenceCompleted);
    }
}
