use crate::sequence::{RunHistory, StepKind};

/// Upper bound on spins a single step may collect.
pub const MAX_SPIN_COUNT: u8 = 5;

/// Determiner segment ids and the spin counts they encode.
const SPIN_COUNT_IDS: [(&str, u8); 5] = [
    ("1-spin", 1),
    ("2-spins", 2),
    ("3-spins", 3),
    ("4-spins", 4),
    ("5-spins", 5),
];

/// Decodes a determiner segment id into a spin count.
pub fn decode_spin_count(segment_id: &str) -> Option<u8> {
    SPIN_COUNT_IDS
        .iter()
        .find(|(id, _)| *id == segment_id)
        .map(|(_, count)| *count)
        .filter(|count| (1..=MAX_SPIN_COUNT).contains(count))
}

/// Number of spins a step collects on this visit. Never fails: anything that
/// cannot be resolved means a single spin.
pub fn resolve_spin_count(kind: &StepKind, history: &RunHistory) -> u8 {
    match kind {
        StepKind::Normal | StepKind::Determiner => 1,
        StepKind::MultiSpinFixed { count, .. } => (*count).clamp(1, MAX_SPIN_COUNT),
        StepKind::MultiSpinDynamic {
            determiner_step_id, ..
        } => {
            let Some(result) = history.latest_for(determiner_step_id) else {
                log::warn!(
                    "Determiner step '{}' has no result yet, defaulting to 1 spin",
                    determiner_step_id
                );
                return 1;
            };
            let segment_id = result.spin_result.segment_id();
            decode_spin_count(segment_id).unwrap_or_else(|| {
                log::warn!(
                    "Determiner step '{}' landed on '{}', which is not a spin count, defaulting to 1 spin",
                    determiner_step_id,
                    segment_id
                );
                1
            })
        }
    }
}
