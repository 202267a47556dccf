use crate::sequence::{Branch, BranchOperator, Condition, ConditionOperator, RunHistory};
use crate::trace::{BranchTrace, ConditionTrace};

/// Evaluates a single branch against run history.
pub(super) struct BranchEngine<'a> {
    branch: &'a Branch,
    history: &'a RunHistory,
}

impl<'a> BranchEngine<'a> {
    pub(super) fn new(branch: &'a Branch, history: &'a RunHistory) -> Self {
        Self { branch, history }
    }

    /// Evaluates the branch's conditions with short-circuiting and returns a trace.
    pub(super) fn evaluate(&self, index: usize) -> BranchTrace {
        let mut conditions = Vec::with_capacity(self.branch.conditions.len());
        let mut decided = false;

        for condition in &self.branch.conditions {
            if decided {
                conditions.push(ConditionTrace::NotEvaluated);
                continue;
            }
            let trace = self.evaluate_condition(condition);
            decided = match (self.branch.operator, trace.outcome()) {
                (BranchOperator::And, Some(false)) => true,
                (BranchOperator::Or, Some(true)) => true,
                _ => false,
            };
            conditions.push(trace);
        }

        let mut outcomes = conditions.iter().filter_map(ConditionTrace::outcome);
        // A branch without conditions is incomplete and never matches.
        let outcome = !self.branch.conditions.is_empty()
            && match self.branch.operator {
                BranchOperator::And => outcomes.all(|o| o),
                BranchOperator::Or => outcomes.any(|o| o),
            };

        BranchTrace {
            index,
            operator: self.branch.operator,
            conditions,
            next_step_id: self.branch.next_step_id.clone(),
            outcome,
        }
    }

    fn evaluate_condition(&self, condition: &Condition) -> ConditionTrace {
        let expected = condition.expected().to_string();
        let Some(result) = self.history.latest_for(&condition.step_id) else {
            return ConditionTrace::Missing {
                step_id: condition.step_id.clone(),
                operator: condition.operator,
                expected,
            };
        };

        let found = result.spin_result.segment_id();
        let outcome = match condition.operator {
            ConditionOperator::Equals => found == expected,
            ConditionOperator::NotEquals => found != expected,
        };
        ConditionTrace::Compared {
            step_id: condition.step_id.clone(),
            operator: condition.operator,
            found: found.to_string(),
            expected,
            outcome,
        }
    }
}
