use super::{BranchTrace, ConditionTrace};

/// Formats branch evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Explains a branch, showing only the conditions that decided it.
    pub fn format_branch(trace: &BranchTrace) -> String {
        let joiner = format!(" {} ", trace.operator);
        let body = trace
            .conditions
            .iter()
            .filter_map(Self::format_condition)
            .collect::<Vec<_>>()
            .join(&joiner);

        let body = if body.is_empty() {
            "(no conditions)".to_string()
        } else {
            body
        };
        format!("branch #{}: {}", trace.index, body)
    }

    fn format_condition(trace: &ConditionTrace) -> Option<String> {
        match trace {
            ConditionTrace::Compared {
                step_id,
                operator,
                expected,
                found,
                ..
            } => Some(format!(
                "${} (was {}) {} {}",
                step_id,
                found,
                operator.symbol(),
                expected
            )),
            ConditionTrace::Missing {
                step_id,
                operator,
                expected,
            } => Some(format!(
                "${} (no result) {} {}",
                step_id,
                operator.symbol(),
                expected
            )),
            ConditionTrace::NotEvaluated => None,
        }
    }

    /// Renders a target step id, or `end` when the sequence completes.
    pub fn format_target(next_step_id: Option<&str>) -> String {
        next_step_id.map_or_else(|| "end".to_string(), |id| id.to_string())
    }
}
