//! Weighted segment selection.
//!
//! Two ways produce an outcome from a wheel: a direct weighted draw, or looking up
//! which segment a physics-driven wheel stopped on. Both go through the same
//! cumulative spans so that a segment's share of the circle is exactly its
//! probability.

use crate::error::SelectionError;
use crate::sequence::Segment;
use rand::Rng;
use std::f64::consts::TAU;
use std::ops::Range;

pub mod weights;

pub use weights::{apply_weight_overrides, redistribute_weights};

/// Usable mass of a segment. Negative or non-finite weights count as zero.
fn effective_weight(segment: &Segment) -> f64 {
    if segment.weight.is_finite() && segment.weight > 0.0 {
        segment.weight
    } else {
        0.0
    }
}

/// Each segment's share of the total weight.
///
/// Falls back to a uniform distribution when every weight is zero.
pub fn compute_probabilities(segments: &[Segment]) -> Result<Vec<f64>, SelectionError> {
    if segments.is_empty() {
        return Err(SelectionError::EmptySegmentSet);
    }

    let total: f64 = segments.iter().map(effective_weight).sum();
    if total <= 0.0 {
        log::debug!(
            "All {} segments have zero weight, using a uniform distribution",
            segments.len()
        );
        let uniform = 1.0 / segments.len() as f64;
        return Ok(vec![uniform; segments.len()]);
    }

    Ok(segments
        .iter()
        .map(|s| effective_weight(s) / total)
        .collect())
}

/// Cumulative `[start, end)` spans over `[0, 2π)`, in segment order.
///
/// The first span starts at 0 and the last landable span ends exactly at 2π, so
/// the spans tile the circle with no gaps from rounding. Trailing zero-weight
/// segments get empty `2π..2π` spans and can never be landed on.
pub fn segment_angular_spans(segments: &[Segment]) -> Result<Vec<Range<f64>>, SelectionError> {
    let probabilities = compute_probabilities(segments)?;
    let last_landable = probabilities
        .iter()
        .rposition(|p| *p > 0.0)
        .unwrap_or(probabilities.len() - 1);

    let mut start = 0.0;
    let spans = probabilities
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let end = if i >= last_landable { TAU } else { start + p * TAU };
            let span = start..end;
            start = end;
            span
        })
        .collect();
    Ok(spans)
}

/// Index of the segment occupying `angle` (radians, any value).
///
/// An angle on a boundary belongs to the segment that starts there.
pub fn segment_at_angle(angle: f64, segments: &[Segment]) -> Result<usize, SelectionError> {
    let spans = segment_angular_spans(segments)?;
    let angle = normalize_angle(angle);
    let index = spans.partition_point(|span| span.end <= angle);
    Ok(index.min(spans.len() - 1))
}

/// Draws a segment index proportionally to weight.
pub fn draw_index<R: Rng>(
    segments: &[Segment],
    rng: &mut R,
) -> Result<usize, SelectionError> {
    let roll: f64 = rng.random();
    segment_at_angle(roll * TAU, segments)
}

fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if normalized >= TAU { 0.0 } else { normalized }
}
