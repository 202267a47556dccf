use crate::sequence::{BranchOperator, ConditionOperator, StepId};

pub mod formatter;

pub use formatter::TraceFormatter;

/// A record of how one branch condition was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionTrace {
    Compared {
        step_id: StepId,
        operator: ConditionOperator,
        expected: String,
        found: String,
        outcome: bool,
    },
    /// The referenced step has no recorded result, so the condition is false.
    Missing {
        step_id: StepId,
        operator: ConditionOperator,
        expected: String,
    },
    /// Skipped because an earlier condition already decided the branch.
    NotEvaluated,
}

impl ConditionTrace {
    pub fn outcome(&self) -> Option<bool> {
        match self {
            ConditionTrace::Compared { outcome, .. } => Some(*outcome),
            ConditionTrace::Missing { .. } => Some(false),
            ConditionTrace::NotEvaluated => None,
        }
    }
}

/// A record of how one branch was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchTrace {
    pub index: usize,
    pub operator: BranchOperator,
    pub conditions: Vec<ConditionTrace>,
    pub next_step_id: StepId,
    pub outcome: bool,
}
