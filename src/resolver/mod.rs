use crate::sequence::{RunHistory, Sequence, Step, StepId, WeightOverride};
use crate::trace::{BranchTrace, TraceFormatter};

mod condition;

use condition::BranchEngine;

/// Where a run goes after a step completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The step to enter next. `None` means the sequence is complete.
    pub next_step_id: Option<StepId>,
    /// Overrides to apply to the next step's wheel.
    pub weight_overrides: Vec<WeightOverride>,
    /// Index of the branch that matched, if any.
    pub matched_branch: Option<usize>,
    /// A human-readable explanation of the decision.
    pub reason: String,
}

impl Transition {
    pub fn is_complete(&self) -> bool {
        self.next_step_id.is_none()
    }
}

/// Picks the next step for a step that just produced a result.
///
/// Branches are tried in array order and the first one whose conditions hold wins,
/// so authors can deliberately overlap conditions and rely on ordering. Anything
/// that cannot be resolved degrades instead of failing: missing results make a
/// condition false, and an unknown target ends the sequence.
pub struct BranchResolver<'a> {
    sequence: &'a Sequence,
}

impl<'a> BranchResolver<'a> {
    pub fn new(sequence: &'a Sequence) -> Self {
        Self { sequence }
    }

    pub fn resolve(&self, step: &Step, history: &RunHistory) -> Transition {
        let traces = self.evaluate_branches(step, history);
        let explanation = traces
            .iter()
            .map(TraceFormatter::format_branch)
            .collect::<Vec<_>>();

        match traces.iter().find(|t| t.outcome) {
            Some(matched) => {
                let branch = &step.branches[matched.index];
                let next_step_id = self.existing(&branch.next_step_id);
                let reason = format!(
                    "{} -> {}",
                    TraceFormatter::format_branch(matched),
                    TraceFormatter::format_target(next_step_id.as_deref())
                );
                log::debug!("Step '{}' took {}", step.id, reason);
                Transition {
                    next_step_id,
                    weight_overrides: branch.weight_overrides.clone(),
                    matched_branch: Some(matched.index),
                    reason,
                }
            }
            None => {
                let next_step_id = step
                    .default_next_step
                    .as_deref()
                    .and_then(|id| self.existing(id));
                let target = TraceFormatter::format_target(next_step_id.as_deref());
                let reason = if explanation.is_empty() {
                    format!("default -> {}", target)
                } else {
                    format!(
                        "no branch matched ({}), default -> {}",
                        explanation.join("; "),
                        target
                    )
                };
                log::debug!("Step '{}' fell through: {}", step.id, reason);
                Transition {
                    next_step_id,
                    weight_overrides: Vec::new(),
                    matched_branch: None,
                    reason,
                }
            }
        }
    }

    /// Evaluates branches in order, stopping at the first match.
    fn evaluate_branches(&self, step: &Step, history: &RunHistory) -> Vec<BranchTrace> {
        let mut traces = Vec::new();
        for (index, branch) in step.branches.iter().enumerate() {
            let trace = BranchEngine::new(branch, history).evaluate(index);
            let matched = trace.outcome;
            traces.push(trace);
            if matched {
                break;
            }
        }
        traces
    }

    fn existing(&self, step_id: &str) -> Option<StepId> {
        if self.sequence.contains(step_id) {
            Some(step_id.to_string())
        } else {
            log::warn!(
                "Next step '{}' does not exist, treating the sequence as complete",
                step_id
            );
            None
        }
    }
}
