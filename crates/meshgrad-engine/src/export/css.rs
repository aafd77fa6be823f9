//! CSS `background` export.
//!
//! Linear, radial and conic gradients have CSS equivalents; the scattered-point
//! mesh does not and yields [`CssOutput::Unsupported`].

use std::fmt;
use std::fmt::Write as _;

use crate::coords::{Canvas, Vec2};
use crate::field::{ConicGeometry, LinearAxis};
use crate::model::{ControlPoint, Gradient, GradientType};
use crate::paint::{ColorStop, ColorStops, Rgb};

const MESH_UNSUPPORTED: &str = "/* CSS has no equivalent for mesh gradients; export as PNG or SVG instead. */";
const EMPTY_UNSUPPORTED: &str = "/* gradient has no control points */";

/// Result of a CSS export.
///
/// `Unsupported` is a regular outcome, not an error: it carries a CSS comment
/// explaining why no `background` value exists.
#[derive(Debug, Clone, PartialEq)]
pub enum CssOutput {
    Gradient(String),
    Solid(Rgb),
    Unsupported(&'static str),
}

impl CssOutput {
    /// The bare `background` value, if there is one.
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Gradient(value) => Some(value.clone()),
            Self::Solid(color) => Some(color.to_hex()),
            Self::Unsupported(_) => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl fmt::Display for CssOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gradient(value) => write!(f, "background: {value};"),
            Self::Solid(color) => write!(f, "background: {color};"),
            Self::Unsupported(comment) => f.write_str(comment),
        }
    }
}

/// Exports `gradient` as a CSS background for a canvas of the given size.
///
/// The canvas size matters for angles: linear and conic angles are measured
/// in pixel space so they agree with the rendered raster.
pub fn to_css(gradient: &Gradient, canvas: Canvas) -> CssOutput {
    let points = &gradient.points;
    let Some(first) = points.first() else {
        return CssOutput::Unsupported(EMPTY_UNSUPPORTED);
    };

    match gradient.kind {
        GradientType::Mesh => CssOutput::Unsupported(MESH_UNSUPPORTED),
        GradientType::Linear => match LinearAxis::new(points, canvas) {
            Ok(axis) => linear(&axis, &axis.stops(points, canvas)),
            Err(e) => {
                log::debug!("css: linear falls back to solid fill: {e}");
                CssOutput::Solid(first.color)
            }
        },
        GradientType::Radial => radial(points),
        GradientType::Conic => match ConicGeometry::new(points, canvas) {
            Ok(geometry) if points.len() > 1 => conic(first, &geometry),
            _ => CssOutput::Solid(first.color),
        },
    }
}

/// CSS angle in degrees for a pixel-space direction.
///
/// CSS measures clockwise from "up" while canvas y grows downward, hence the
/// flipped `dy`. The result is in `[0, 360)`.
pub fn css_angle(direction: Vec2) -> f64 {
    (90.0 - (-direction.y).atan2(direction.x).to_degrees()).rem_euclid(360.0)
}

fn linear(axis: &LinearAxis, stops: &ColorStops) -> CssOutput {
    let angle = css_angle(axis.direction()).round().rem_euclid(360.0);
    let mut css = format!("linear-gradient({angle}deg");
    push_percent_stops(&mut css, stops);
    css.push(')');
    CssOutput::Gradient(css)
}

/// Offsets are distances from the first point normalized by the farthest
/// point, measured in unit space.
fn radial(points: &[ControlPoint]) -> CssOutput {
    let center = points[0].position();
    let distances: Vec<f64> = points.iter().map(|p| (p.position() - center).length()).collect();
    let max = distances.iter().copied().fold(0.0, f64::max);

    let stops = ColorStops::new(points.iter().zip(&distances).map(|(p, &d)| {
        let t = if max > 0.0 { d / max } else { 0.0 };
        ColorStop::new(t, p.color)
    }));

    let mut css = format!(
        "radial-gradient(circle at {}% {}%",
        percent(center.x),
        percent(center.y)
    );
    push_percent_stops(&mut css, &stops);
    css.push(')');
    CssOutput::Gradient(css)
}

/// Angular stops rotated into CSS degrees and sorted. The sweep is closed at
/// `0deg` and `360deg` with the seam color so it wraps from the last stop back
/// to the first the same way the raster does.
fn conic(center: &ControlPoint, geometry: &ConicGeometry) -> CssOutput {
    let mut stops: Vec<(f64, Rgb)> = geometry
        .stops()
        .iter()
        .map(|s| ((s.angle.to_degrees() + 90.0).rem_euclid(360.0), s.color))
        .collect();
    stops.sort_by(|a, b| a.0.total_cmp(&b.0));

    if let (Some(&(first, first_color)), Some(&(last, _))) = (stops.first(), stops.last()) {
        // A stop on the seam is itself the seam color.
        let seam = if first > 0.0 { geometry.north_color() } else { first_color };
        if first > 0.0 {
            stops.insert(0, (0.0, seam));
        }
        if last < 360.0 {
            stops.push((360.0, seam));
        }
    }

    let mut css = format!(
        "conic-gradient(from 0deg at {}% {}%",
        percent(center.x),
        percent(center.y)
    );
    for (deg, color) in stops {
        let _ = write!(css, ", {color} {}deg", deg.round());
    }
    css.push(')');
    CssOutput::Gradient(css)
}

fn push_percent_stops(css: &mut String, stops: &ColorStops) {
    for stop in stops.as_slice() {
        let _ = write!(css, ", {} {}%", stop.color, percent(stop.t));
    }
}

fn percent(unit: f64) -> f64 {
    (unit * 100.0).round()
}
