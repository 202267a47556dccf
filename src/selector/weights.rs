use crate::sequence::{Segment, WeightOverride};
use ahash::AHashSet;

/// Weight budget authors reason in: a wheel's weights read as percentages.
pub const DEFAULT_WEIGHT_BUDGET: f64 = 100.0;

/// Returns a copy of `segments` with branch overrides applied.
///
/// Named segments take their new weight as-is. When at least one override lands,
/// the segments not named split what is left of `budget` equally. Overrides naming
/// an unknown segment are ignored.
pub fn apply_weight_overrides(
    segments: &[Segment],
    overrides: &[WeightOverride],
    budget: f64,
) -> Vec<Segment> {
    let mut result = segments.to_vec();
    if overrides.is_empty() {
        return result;
    }

    let mut overridden = AHashSet::new();
    for weight_override in overrides {
        match result
            .iter_mut()
            .position(|s| s.id == weight_override.segment_id)
        {
            Some(index) => {
                result[index].weight = weight_override.new_weight.max(0.0);
                overridden.insert(index);
            }
            None => log::debug!(
                "Ignoring weight override for unknown segment '{}'",
                weight_override.segment_id
            ),
        }
    }

    if overridden.is_empty() {
        return result;
    }

    let untouched = result.len() - overridden.len();
    if untouched > 0 {
        let used: f64 = overridden.iter().map(|&i| result[i].weight).sum();
        let share = (budget - used).max(0.0) / untouched as f64;
        for (index, segment) in result.iter_mut().enumerate() {
            if !overridden.contains(&index) {
                segment.weight = share;
            }
        }
    }
    result
}

/// Editor helper: pins one segment's weight and spreads the rest of `budget`
/// evenly over the other segments.
pub fn redistribute_weights(
    segments: &[Segment],
    pinned_index: usize,
    new_weight: f64,
    budget: f64,
) -> Vec<Segment> {
    let mut result = segments.to_vec();
    if pinned_index >= result.len() {
        return result;
    }

    let pinned = new_weight.clamp(0.0, budget);
    let others = result.len() - 1;
    let share = if others > 0 {
        (budget - pinned) / others as f64
    } else {
        0.0
    };

    for (index, segment) in result.iter_mut().enumerate() {
        segment.weight = if index == pinned_index { pinned } else { share };
    }
    result
}
