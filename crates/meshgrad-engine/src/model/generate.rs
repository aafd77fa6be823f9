//! Randomized gradient generation.
//!
//! Randomness only happens here; evaluation is deterministic.

use std::time::{SystemTime, UNIX_EPOCH};

use super::{ControlPoint, Gradient, GradientType, SAFE_MAX, SAFE_MIN};
use crate::coords::Vec2;
use crate::paint::Rgb;

/// Uniform 24-bit color.
pub fn random_color(rng: &mut fastrand::Rng) -> Rgb {
    Rgb::new(rng.u8(..), rng.u8(..), rng.u8(..))
}

/// Uniform position inside the interactive-safe range.
pub fn random_position(rng: &mut fastrand::Rng) -> Vec2 {
    let span = SAFE_MAX - SAFE_MIN;
    Vec2::new(rng.f64() * span + SAFE_MIN, rng.f64() * span + SAFE_MIN)
}

pub fn random_point(rng: &mut fastrand::Rng) -> ControlPoint {
    let pos = random_position(rng);
    ControlPoint::new(pos.x, pos.y, random_color(rng))
}

pub fn random_points(rng: &mut fastrand::Rng, count: usize) -> Vec<ControlPoint> {
    (0..count).map(|_| random_point(rng)).collect()
}

/// Identifier derived from the wall clock, in Unix milliseconds.
pub fn timestamp_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    millis.to_string()
}

/// Fresh mesh gradient with `count` random points and default flags.
pub fn random_gradient(rng: &mut fastrand::Rng, count: usize) -> Gradient {
    Gradient::new(timestamp_id(), GradientType::Mesh, random_points(rng, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_stay_in_safe_range() {
        let mut rng = fastrand::Rng::with_seed(1);
        for p in random_points(&mut rng, 500) {
            assert!((SAFE_MIN..SAFE_MAX).contains(&p.x));
            assert!((SAFE_MIN..SAFE_MAX).contains(&p.y));
        }
    }

    #[test]
    fn same_seed_same_points() {
        let a = random_points(&mut fastrand::Rng::with_seed(42), 16);
        let b = random_points(&mut fastrand::Rng::with_seed(42), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn new_gradient_defaults() {
        let g = random_gradient(&mut fastrand::Rng::with_seed(3), 4);
        assert_eq!(g.kind, GradientType::Mesh);
        assert_eq!(g.points.len(), 4);
        assert!(g.flags.show_handles);
        assert!(!g.flags.show_lines);
        assert!(g.id.parse::<u128>().is_ok());
    }
}
