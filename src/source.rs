use crate::error::SelectionError;
use crate::selector::{draw_index, segment_at_angle};
use crate::sequence::{SpinResult, Wheel};
use rand::Rng;

/// Anything that can turn a wheel into a landed segment.
///
/// This is the seam between the engine and whatever physically spins the wheel:
/// a physics simulation reporting where it stopped, or a plain weighted draw.
pub trait SpinSource {
    fn spin(&mut self, wheel: &Wheel) -> Result<SpinResult, SelectionError>;
}

/// Draws outcomes directly from the segment probabilities.
pub struct WeightedDraw<R: Rng> {
    rng: R,
}

impl<R: Rng> WeightedDraw<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SpinSource for WeightedDraw<R> {
    fn spin(&mut self, wheel: &Wheel) -> Result<SpinResult, SelectionError> {
        let index = draw_index(&wheel.segments, &mut self.rng)?;
        Ok(SpinResult::new(index, wheel.segments[index].clone()))
    }
}

/// Resolves outcomes from the angle a physics-driven wheel stopped at.
pub struct LandingAngle<F: FnMut() -> f64> {
    next_angle: F,
}

impl<F: FnMut() -> f64> LandingAngle<F> {
    pub fn new(next_angle: F) -> Self {
        Self { next_angle }
    }
}

impl<F: FnMut() -> f64> SpinSource for LandingAngle<F> {
    fn spin(&mut self, wheel: &Wheel) -> Result<SpinResult, SelectionError> {
        let angle = (self.next_angle)();
        let index = segment_at_angle(angle, &wheel.segments)?;
        log::debug!("Wheel stopped at {:.4} rad on segment #{}", angle, index);
        Ok(SpinResult::new(index, wheel.segments[index].clone()))
    }
}

/// The available spin sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChoice {
    /// Draws directly from the weights.
    Draw,
    /// Picks a uniformly random landing angle and looks the segment up.
    Angle,
}
