use crate::consts::REFERENCE_FRAME_RATE;
use crate::geometry::Position;

/// Per-tick interpolation fraction for `damping` over `dt_s` seconds.
///
/// `damping` is the fraction of the remaining distance closed in one
/// reference frame; longer or shorter ticks compound it so the curve is the
/// same at any frame rate. Non-positive `dt_s` means no motion.
pub fn step_fraction(damping: f64, dt_s: f64) -> f64 {
    if dt_s.is_nan() || dt_s <= 0.0 {
        return 0.0;
    }
    let frames = dt_s * REFERENCE_FRAME_RATE;
    (1.0 - (1.0 - damping.clamp(0.0, 1.0)).powf(frames)).clamp(0.0, 1.0)
}

/// Rendered positions that chase their targets with exponential smoothing.
///
/// Each step starts from the current rendered position, never from an
/// earlier target, so a target change mid-flight bends the path smoothly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animator {
    rendered: Vec<Position>,
}

impl Animator {
    /// Start with every item resting at `initial`.
    pub fn new(initial: &[Position]) -> Self {
        Self {
            rendered: initial.to_vec(),
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.rendered
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    /// Snap every item onto `positions` without animating.
    pub fn reset(&mut self, positions: &[Position]) {
        self.rendered = positions.to_vec();
    }

    /// Move each rendered position `fraction` of the way to its target.
    ///
    /// Items beyond the end of `targets` keep their position.
    pub fn step(&mut self, targets: &[Position], fraction: f64) {
        for (current, &target) in self.rendered.iter_mut().zip(targets) {
            *current = current.lerp(target, fraction);
        }
    }

    /// Largest remaining distance between any item and its target.
    pub fn max_error(&self, targets: &[Position]) -> f64 {
        self.rendered
            .iter()
            .zip(targets)
            .map(|(a, &b)| a.distance(b))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_reference_frame_uses_damping() {
        let f = step_fraction(0.15, 1.0 / REFERENCE_FRAME_RATE);
        assert!((f - 0.15).abs() < 1e-9);
    }

    #[test]
    fn two_short_ticks_match_one_long_tick() {
        let half = step_fraction(0.15, 0.5 / REFERENCE_FRAME_RATE);
        let remaining = (1.0 - half) * (1.0 - half);
        assert!((1.0 - remaining - 0.15).abs() < 1e-9);
    }

    #[test]
    fn zero_dt_does_not_move() {
        assert_eq!(step_fraction(0.15, 0.0), 0.0);
        assert_eq!(step_fraction(0.15, f64::NAN), 0.0);
    }
}
