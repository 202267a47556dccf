//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the spinverse
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use spinverse::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = SequenceDocument::from_file("path/to/sequence.json")?;
//! let mut session = SpinSession::new(document.into_sequence()?);
//! session.start();
//!
//! let mut source = WeightedDraw::new(rand::rng());
//! let effects = session.spin_with(&mut source)?;
//! println!("Effects: {:?}", effects);
//! # Ok(())
//! # }
//! ```

// Engine and session
pub use crate::engine::{
    DiscardReason, Effect, EventId, RunEvent, RunState, RunStatus, SessionBuilder, SpinEvent,
    SpinSession,
};
pub use crate::orchestrator::{MultiSpinOrchestrator, MultiSpinState, SpinDisposition};
pub use crate::resolver::{BranchResolver, Transition};

// Sequence model
pub use crate::sequence::{
    Branch, BranchOperator, Condition, ConditionOperator, HistorySnapshot, IntoSequence,
    Rarity, RunHistory, Segment, Sequence, SequenceResult, SpinResult, Step, StepId, StepKind,
    WeightOverride, Wheel,
};

// Selection and spin sources
pub use crate::selector::{compute_probabilities, segment_angular_spans, segment_at_angle};
pub use crate::source::{LandingAngle, SourceChoice, SpinSource, WeightedDraw};

// Authoring data
pub use crate::data::SequenceDocument;

// Error types
pub use crate::error::{ConversionError, SelectionError, SequenceError, SnapshotError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
