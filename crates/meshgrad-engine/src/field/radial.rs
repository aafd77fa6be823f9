//! Radial gradient geometry: circle centered on the first point.

use crate::coords::{Canvas, Vec2};
use crate::error::DegenerateGeometry;
use crate::model::ControlPoint;
use crate::paint::{ColorStop, ColorStops, Rgb, Rgba8};

/// Center and outer radius in pixel space.
///
/// The outer radius is the distance from the first to the second point, or
/// half the larger canvas side when there is only one point. The SVG exporter
/// uses exactly this geometry; the CSS exporter deliberately does not.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RadialGeometry {
    center: Vec2,
    radius: f64,
}

impl RadialGeometry {
    pub fn new(points: &[ControlPoint], canvas: Canvas) -> Result<Self, DegenerateGeometry> {
        let (center, radius) = match points {
            [] => return Err(DegenerateGeometry::NoPoints),
            [only] => (canvas.to_pixels(only.position()), canvas.max_side() / 2.0),
            [first, second, ..] => {
                let center = canvas.to_pixels(first.position());
                (center, (canvas.to_pixels(second.position()) - center).length())
            }
        };

        if !(radius > 0.0 && radius.is_finite()) {
            return Err(DegenerateGeometry::ZeroRadius);
        }
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance from the center normalized by the outer radius, clamped to `[0, 1]`.
    #[inline]
    pub fn offset(&self, at: Vec2) -> f64 {
        ((at - self.center).length() / self.radius).clamp(0.0, 1.0)
    }

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

pub(crate) struct RadialShader {
    geometry: RadialGeometry,
    stops: ColorStops,
    fallback: Rgb,
}

impl RadialShader {
    pub(crate) fn new(geometry: RadialGeometry, points: &[ControlPoint], canvas: Canvas) -> Self {
        let stops = geometry.stops(points, canvas);
        let fallback = points.first().map_or(Rgb::BLACK, |p| p.color);
        Self { geometry, stops, fallback }
    }

    #[inline]
    pub(crate) fn shade(&self, at: Vec2) -> Rgba8 {
        self.stops.sample(self.geometry.offset(at)).unwrap_or(self.fallback).opaque()
    }
}
