use super::definition::{Branch, BranchOperator, Condition, ConditionOperator, Sequence, Step, StepKind};
use crate::error::SequenceError;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Checks a sequence for authoring mistakes.
///
/// Runs never require this: the engine treats every problem reported here as a
/// fail-soft case. Editors call it to surface errors before a run starts.
pub fn validate(sequence: &Sequence) -> Result<(), Vec<SequenceError>> {
    let mut errors = Vec::new();
    let mut seen = AHashSet::new();

    for step in &sequence.steps {
        if !seen.insert(step.id.as_str()) {
            errors.push(SequenceError::DuplicateStepId(step.id.clone()));
        }
    }

    if !sequence.contains(&sequence.start_step_id) {
        errors.push(SequenceError::MissingStartStep(
            sequence.start_step_id.clone(),
        ));
    }

    for step in &sequence.steps {
        check_wheel(step, &mut errors);
        check_references(step, sequence, &mut errors);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_wheel(step: &Step, errors: &mut Vec<SequenceError>) {
    let segments = &step.wheel.segments;
    if segments.is_empty() {
        errors.push(SequenceError::EmptyWheel {
            step_id: step.id.clone(),
        });
        return;
    }

    for segment in segments {
        if !segment.weight.is_finite() || segment.weight < 0.0 {
            errors.push(SequenceError::InvalidWeight {
                step_id: step.id.clone(),
                segment_id: segment.id.clone(),
                weight: segment.weight,
            });
        }
    }

    // Mirrors the selector: only finite positive weights carry mass.
    if segments
        .iter()
        .all(|s| !s.weight.is_finite() || s.weight <= 0.0)
    {
        errors.push(SequenceError::ZeroWeightWheel {
            step_id: step.id.clone(),
        });
    }
}

fn check_references(step: &Step, sequence: &Sequence, errors: &mut Vec<SequenceError>) {
    let targets = step
        .default_next_step
        .iter()
        .chain(step.branches.iter().map(|b| &b.next_step_id));
    for target in targets.unique() {
        if !sequence.contains(target) {
            errors.push(SequenceError::DanglingReference {
                source_step_id: step.id.clone(),
                missing_step_id: target.clone(),
            });
        }
    }

    let referenced = step
        .branches
        .iter()
        .flat_map(|b| b.conditions.iter().map(|c| &c.step_id));
    for referenced_step_id in referenced.unique() {
        if !sequence.contains(referenced_step_id) {
            errors.push(SequenceError::UnknownConditionStep {
                step_id: step.id.clone(),
                referenced_step_id: referenced_step_id.clone(),
            });
        }
    }

    if let StepKind::MultiSpinDynamic {
        determiner_step_id, ..
    } = &step.kind
    {
        let is_determiner = sequence
            .step(determiner_step_id)
            .is_some_and(|d| d.kind == StepKind::Determiner);
        if !is_determiner {
            errors.push(SequenceError::InvalidDeterminer {
                step_id: step.id.clone(),
                determiner_step_id: determiner_step_id.clone(),
            });
        }
    }
}

/// Two branches on the same step that can both match. The later one is shadowed
/// whenever the earlier one matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchConflict {
    pub winner: usize,
    pub shadowed: usize,
}

/// Finds every pair of branches on `step` whose conditions can hold at the same time.
pub fn find_branch_conflicts(step: &Step) -> Vec<BranchConflict> {
    let clauses: Vec<Vec<Vec<&Condition>>> = step.branches.iter().map(branch_clauses).collect();

    (0..clauses.len())
        .tuple_combinations()
        .filter(|&(a, b)| {
            clauses[a].iter().any(|left| {
                clauses[b]
                    .iter()
                    .any(|right| satisfiable(left.iter().chain(right.iter()).copied()))
            })
        })
        .map(|(winner, shadowed)| BranchConflict { winner, shadowed })
        .collect()
}

/// Rewrites a branch as alternatives of condition conjunctions.
fn branch_clauses(branch: &Branch) -> Vec<Vec<&Condition>> {
    if branch.conditions.is_empty() {
        return Vec::new();
    }
    match branch.operator {
        BranchOperator::And => vec![branch.conditions.iter().collect()],
        BranchOperator::Or => branch.conditions.iter().map(|c| vec![c]).collect(),
    }
}

/// A conjunction is satisfiable unless a step must equal two different segments,
/// or must both equal and not equal the same one.
fn satisfiable<'a>(conditions: impl Iterator<Item = &'a Condition>) -> bool {
    let mut required: AHashMap<&str, &str> = AHashMap::new();
    let mut excluded: AHashMap<&str, AHashSet<&str>> = AHashMap::new();

    for condition in conditions {
        let step = condition.step_id.as_str();
        match condition.operator {
            ConditionOperator::Equals => {
                if let Some(existing) = required.insert(step, condition.expected()) {
                    if existing != condition.expected() {
                        return false;
                    }
                }
            }
            ConditionOperator::NotEquals => {
                excluded.entry(step).or_default().insert(condition.expected());
            }
        }
    }

    required
        .iter()
        .all(|(step, value)| excluded.get(step).is_none_or(|set| !set.contains(value)))
}
