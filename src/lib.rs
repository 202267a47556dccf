//! # SpinVerse - Sequence Branching and Multi-Spin Engine
//!
//! **SpinVerse** runs users through a sequence of steps, each with a weighted
//! probability wheel. The engine decides which step comes next from conditional
//! branches over earlier results, applies per-branch weight overrides to the next
//! wheel, and folds "spin N times" steps into a single logical result.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Data**: Parse the editor's JSON (`data::SequenceDocument`) or your own
//!     format, and convert it with the `IntoSequence` trait.
//! 2.  **Open a Session**: `SpinSession::builder(sequence).build()` owns the single run.
//! 3.  **Spin**: Report outcomes from any `SpinSource` (a physics wheel's landing angle
//!     or a direct weighted draw). Each call returns the `Effect`s to act on.
//! 4.  **Read History**: `RunHistory` holds one `SequenceResult` per visited step, ready
//!     for narrative generation or display.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spinverse::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! fn main() -> Result<()> {
//!     let sequence = Sequence::new(
//!         "weather",
//!         vec![
//!             Step::new("weather", vec![Segment::new("storm", 30.0), Segment::new("sun", 70.0)])
//!                 .with_default_next("journey")
//!                 .with_branch(
//!                     Branch::new(BranchOperator::And, vec![Condition::equals("weather", "storm")], "shelter")
//!                         .with_override("cave", 80.0),
//!                 ),
//!             Step::new("journey", vec![Segment::new("road", 50.0), Segment::new("river", 50.0)]),
//!             Step::new("shelter", vec![Segment::new("cave", 50.0), Segment::new("inn", 50.0)]),
//!         ],
//!     );
//!
//!     let mut session = SpinSession::builder(sequence).build();
//!     let mut source = WeightedDraw::new(StdRng::seed_from_u64(7));
//!     session.run_to_completion(&mut source, 32)?;
//!
//!     for result in session.history().iter() {
//!         println!("{} -> {}", result.step_id, result.spin_result.segment.text);
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "actor")]
pub mod actor;
pub mod data;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod prelude;
pub mod resolver;
pub mod selector;
pub mod sequence;
pub mod source;
pub mod trace;
