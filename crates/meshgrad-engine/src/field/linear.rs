//! Linear gradient geometry: the axis from the first to the last point.

use crate::coords::{Canvas, Vec2};
use crate::error::DegenerateGeometry;
use crate::model::ControlPoint;
use crate::paint::{ColorStop, ColorStops, Rgb, Rgba8};

/// Directed axis in pixel space with precomputed squared length.
///
/// Shared by the evaluator, the SVG exporter and the CSS exporter so stop
/// offsets agree across every output.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearAxis {
    start: Vec2,
    end: Vec2,
    dir: Vec2,
    len_sq: f64,
}

impl LinearAxis {
    /// Axis from the first to the last point, mapped onto `canvas`.
    pub fn new(points: &[ControlPoint], canvas: Canvas) -> Result<Self, DegenerateGeometry> {
        let (first, last) = match points {
            [] => return Err(DegenerateGeometry::NoPoints),
            [_] => return Err(DegenerateGeometry::TooFewPoints { needed: 2, found: 1 }),
            [first, .., last] => (first, last),
        };

        let start = canvas.to_pixels(first.position());
        let end = canvas.to_pixels(last.position());
        let dir = end - start;
        let len_sq = dir.length_squared();
        if !(len_sq > 0.0 && len_sq.is_finite()) {
            return Err(DegenerateGeometry::ZeroLengthAxis);
        }

        Ok(Self { start, end, dir, len_sq })
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Start → end vector in pixels.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    /// Orthogonal projection of a pixel-space position onto the axis,
    /// clamped to `[0, 1]`.
    #[inline]
    pub fn offset(&self, at: Vec2) -> f64 {
        ((at - self.start).dot(self.dir) / self.len_sq).clamp(0.0, 1.0)
    }

    /// Stop offset of each point, in point order.
    pub fn point_offsets(&self, points: &[ControlPoint], canvas: Canvas) -> Vec<f64> {
        points.iter().map(|p| self.offset(canvas.to_pixels(p.position()))).collect()
    }

    pub fn stops(&self, points: &[ControlPoint], canvas: Canvas) -> ColorStops {
        ColorStops::new(
            points
                .iter()
                .zip(self.point_offsets(points, canvas))
                .map(|(p, t)| ColorStop::new(t, p.color)),
        )
    }
}

pub(crate) struct LinearShader {
    axis: LinearAxis,
    stops: ColorStops,
    fallback: Rgb,
}

impl LinearShader {
    pub(crate) fn new(axis: LinearAxis, points: &[ControlPoint], canvas: Canvas) -> Self {
        let stops = axis.stops(points, canvas);
        let fallback = points.first().map_or(Rgb::BLACK, |p| p.color);
        Self { axis, stops, fallback }
    }

    #[inline]
    pub(crate) fn shade(&self, at: Vec2) -> Rgba8 {
        self.stops.sample(self.axis.offset(at)).unwrap_or(self.fallback).opaque()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> ControlPoint {
        ControlPoint::new(x, y, Rgb::BLACK)
    }

    #[test]
    fn degenerate_axes() {
        let c = Canvas::new(100, 100);
        assert_eq!(LinearAxis::new(&[], c), Err(DegenerateGeometry::NoPoints));
        assert_eq!(
            LinearAxis::new(&[pt(0.1, 0.1)], c),
            Err(DegenerateGeometry::TooFewPoints { needed: 2, found: 1 })
        );
        assert_eq!(
            LinearAxis::new(&[pt(0.3, 0.3), pt(0.9, 0.9), pt(0.3, 0.3)], c),
            Err(DegenerateGeometry::ZeroLengthAxis)
        );
    }

    #[test]
    fn offsets_follow_projection() {
        let c = Canvas::new(100, 100);
        let points = [pt(0.0, 0.5), pt(0.25, 0.9), pt(1.5, 0.1), pt(1.0, 0.5)];
        let axis = LinearAxis::new(&points, c).unwrap();
        assert_eq!(axis.point_offsets(&points, c), vec![0.0, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn offsets_use_pixel_space_on_wide_canvas() {
        // Diagonal axis on a 200x100 canvas: (0,0) -> (200,100).
        let c = Canvas::new(200, 100);
        let points = [pt(0.0, 0.0), pt(0.5, 0.0), pt(1.0, 1.0)];
        let axis = LinearAxis::new(&points, c).unwrap();
        // (100,0)·(200,100) / (200²+100²) = 20000 / 50000
        assert!((axis.point_offsets(&points, c)[1] - 0.4).abs() < 1e-12);
    }
}
