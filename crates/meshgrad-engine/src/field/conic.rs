//! Conic (angular) sweep around the first point.

use std::f64::consts::TAU;

use crate::coords::{Canvas, Vec2};
use crate::error::DegenerateGeometry;
use crate::model::ControlPoint;
use crate::paint::Rgb;

/// Angle of `v` in radians, normalized to `[0, 2π)`.
///
/// Measured from +X towards +Y, i.e. clockwise on a y-down canvas.
#[inline]
pub fn normalized_angle(v: Vec2) -> f64 {
    let a = v.angle();
    let a = if a < 0.0 { a + TAU } else { a };
    if a >= TAU { 0.0 } else { a }
}

/// A point's angular position around the center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AngularStop {
    pub angle: f64,
    pub color: Rgb,
}

/// Center plus every point sorted by angle.
///
/// The center point itself is included (its angle is 0); points sharing an
/// angle keep their input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicGeometry {
    center: Vec2,
    stops: Vec<AngularStop>,
}

impl ConicGeometry {
    pub fn new(points: &[ControlPoint], canvas: Canvas) -> Result<Self, DegenerateGeometry> {
        let first = points.first().ok_or(DegenerateGeometry::NoPoints)?;
        let center = canvas.to_pixels(first.position());

        let mut stops: Vec<AngularStop> = points
            .iter()
            .map(|p| AngularStop {
                angle: normalized_angle(canvas.to_pixels(p.position()) - center),
                color: p.color,
            })
            .collect();
        stops.sort_by(|a, b| a.angle.total_cmp(&b.angle));

        Ok(Self { center, stops })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn stops(&self) -> &[AngularStop] {
        &self.stops
    }

    /// Color at pixel-space position `at`.
    ///
    /// Finds the sorted pair bracketing the pixel's angle (the last pair wraps
    /// from the final stop back to the first through 2π) and interpolates by
    /// the fractional angular position. Among stops sharing an angle the later
    /// one starts the next interval, so zero-width intervals never divide.
    pub fn color_at(&self, at: Vec2) -> Rgb {
        let n = self.stops.len();
        match n {
            0 => return Rgb::BLACK,
            1 => return self.stops[0].color,
            _ => {}
        }

        let angle = normalized_angle(at - self.center);

        // Number of stops at or before `angle`. 0 or n means the pixel lies in
        // the wrap-around interval.
        let idx = self.stops.partition_point(|s| s.angle <= angle);
        let (a, b, span) = if idx == 0 || idx == n {
            let a = self.stops[n - 1];
            let b = self.stops[0];
            let span = (b.angle - a.angle).rem_euclid(TAU);
            (a, b, if span > 0.0 { span } else { TAU })
        } else {
            let a = self.stops[idx - 1];
            let b = self.stops[idx];
            (a, b, b.angle - a.angle)
        };

        let delta = (angle - a.angle).rem_euclid(TAU);
        let t = if span > 0.0 { (delta / span).clamp(0.0, 1.0) } else { 0.0 };

        a.color.lerp(b.color, t)
    }

    /// Color straight up from the center, where a CSS conic sweep starts.
    pub fn north_color(&self) -> Rgb {
        self.color_at(self.center + Vec2::new(0.0, -1.0))
    }
}
