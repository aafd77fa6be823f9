//! Inverse-distance-weighted (Shepard) interpolation.

use crate::coords::{Canvas, Vec2};
use crate::model::ControlPoint;
use crate::paint::{Rgb, Rgba8};

/// Pixels closer than this to a point take its color exactly.
const COINCIDENT_EPSILON: f64 = 1e-4;

struct Site {
    pos: Vec2,
    color: Rgb,
    rgb: [f64; 3],
}

/// Per-render mesh state: points pre-mapped into pixel space.
pub(crate) struct MeshShader {
    sites: Vec<Site>,
}

impl MeshShader {
    pub(crate) fn new(points: &[ControlPoint], canvas: Canvas) -> Self {
        let sites = points
            .iter()
            .map(|p| Site {
                pos: canvas.to_pixels(p.position()),
                color: p.color,
                rgb: [p.color.r as f64, p.color.g as f64, p.color.b as f64],
            })
            .collect();
        Self { sites }
    }

    /// Color at pixel-space position `at`.
    ///
    /// Weight is `1 / d²`. A coincident point short-circuits the sum so the
    /// singularity never reaches the accumulator.
    pub(crate) fn shade(&self, at: Vec2) -> Rgba8 {
        let mut acc = [0.0f64; 3];
        let mut total = 0.0f64;

        for site in &self.sites {
            let d2 = (site.pos - at).length_squared();
            if d2 < COINCIDENT_EPSILON * COINCIDENT_EPSILON {
                return site.color.opaque();
            }
            let w = 1.0 / d2;
            total += w;
            acc[0] += site.rgb[0] * w;
            acc[1] += site.rgb[1] * w;
            acc[2] += site.rgb[2] * w;
        }

        if !(total > 0.0 && total.is_finite()) {
            return self.sites.first().map_or(Rgba8::TRANSPARENT, |s| s.color.opaque());
        }

        let channel = |c: f64| (c / total).round().clamp(0.0, 255.0) as u8;
        Rgba8 { r: channel(acc[0]), g: channel(acc[1]), b: channel(acc[2]), a: 255 }
    }
}
