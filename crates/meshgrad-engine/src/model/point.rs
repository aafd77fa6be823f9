use serde::{Deserialize, Serialize};

use crate::coords::Vec2;
use crate::paint::Rgb;

/// Lower bound for coordinates produced by interactive edits.
pub const SAFE_MIN: f64 = 0.05;
/// Upper bound for coordinates produced by interactive edits.
pub const SAFE_MAX: f64 = 0.95;

/// A colored control point in the unit square.
///
/// Loaded gradients may carry any position in `[0, 1]`; interactive edits keep
/// points inside `[SAFE_MIN, SAFE_MAX]` via [`ControlPoint::clamped_to_safe`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

impl ControlPoint {
    #[inline]
    pub const fn new(x: f64, y: f64, color: Rgb) -> Self {
        Self { x, y, color }
    }

    #[inline]
    pub fn position(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Same point with its position clamped into the interactive-safe range.
    ///
    /// Non-finite coordinates collapse to the canvas center.
    pub fn clamped_to_safe(self) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.clamp(SAFE_MIN, SAFE_MAX) } else { 0.5 };
        Self { x: clamp(self.x), y: clamp(self.y), color: self.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_safe_range() {
        let p = ControlPoint::new(-1.0, 2.0, Rgb::BLACK).clamped_to_safe();
        assert_eq!((p.x, p.y), (SAFE_MIN, SAFE_MAX));

        let q = ControlPoint::new(0.3, f64::NAN, Rgb::BLACK).clamped_to_safe();
        assert_eq!((q.x, q.y), (0.3, 0.5));
    }
}
