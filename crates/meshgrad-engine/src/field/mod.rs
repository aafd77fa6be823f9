//! Field evaluator: gradient description → dense RGBA raster.
//!
//! One strategy per [`GradientType`]:
//! - mesh: inverse-square-distance weighting over every point
//! - linear: 1-D stops along the first → last point axis
//! - radial: 1-D stops by distance from the first point
//! - conic: angular interpolation between points sorted around the first point
//!
//! Rendering is deterministic. Rows are shaded in parallel; each strategy's
//! shader is a plain struct and the row loop is monomorphized per variant.
//! Degenerate geometry never fails a render: it falls back to a solid fill of
//! the first point's color (or transparent when there are no points).

mod cancel;
mod conic;
mod linear;
mod mesh;
mod pixmap;
mod radial;

use rayon::prelude::*;

pub use cancel::CancelToken;
pub use conic::{AngularStop, ConicGeometry, normalized_angle};
pub use linear::LinearAxis;
pub use pixmap::{MAX_PIXELS, Pixmap};
pub use radial::RadialGeometry;

use crate::coords::{Canvas, Vec2};
use crate::error::{DegenerateGeometry, RenderError};
use crate::model::{Gradient, GradientType};
use crate::paint::Rgba8;

use linear::LinearShader;
use mesh::MeshShader;
use radial::RadialShader;

/// Renders `gradient` into a new `width × height` pixmap.
///
/// Never fails for sane sizes; an oversized target logs an error and yields an
/// empty pixmap. Use [`evaluate_with`] to observe errors or cancel.
pub fn evaluate(gradient: &Gradient, width: u32, height: u32) -> Pixmap {
    match evaluate_with(gradient, Canvas::new(width, height), &CancelToken::new()) {
        Ok(pixmap) => pixmap,
        Err(e) => {
            log::error!("evaluate {width}x{height}: {e}");
            Pixmap::default()
        }
    }
}

/// Renders into a new pixmap, honoring `cancel`.
pub fn evaluate_with(
    gradient: &Gradient,
    canvas: Canvas,
    cancel: &CancelToken,
) -> Result<Pixmap, RenderError> {
    let mut pixmap = Pixmap::new(canvas)?;
    evaluate_into(gradient, canvas, &mut pixmap, cancel)?;
    Ok(pixmap)
}

/// Renders into a caller-owned pixmap, resizing it to `canvas`.
///
/// On `Err(RenderError::Cancelled)` the pixmap holds a partial frame and must
/// be discarded.
pub fn evaluate_into(
    gradient: &Gradient,
    canvas: Canvas,
    pixmap: &mut Pixmap,
    cancel: &CancelToken,
) -> Result<(), RenderError> {
    pixmap.resize(canvas)?;
    if canvas.is_empty() {
        return Ok(());
    }

    log::trace!(
        "evaluate {} gradient ({} points) at {}x{}",
        gradient.kind,
        gradient.points.len(),
        canvas.width,
        canvas.height
    );

    match Shader::build(gradient, canvas) {
        Shader::Solid(color) => {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            pixmap.pixels_mut().fill(color);
            Ok(())
        }
        Shader::Mesh(s) => shade_rows(pixmap, cancel, |at| s.shade(at)),
        Shader::Linear(s) => shade_rows(pixmap, cancel, |at| s.shade(at)),
        Shader::Radial(s) => shade_rows(pixmap, cancel, |at| s.shade(at)),
        Shader::Conic(s) => shade_rows(pixmap, cancel, |at| s.color_at(at).opaque()),
    }
}

/// Reports whether `gradient` would render through the degenerate fallback.
pub fn check_geometry(gradient: &Gradient, canvas: Canvas) -> Result<(), DegenerateGeometry> {
    let points = &gradient.points;
    if points.is_empty() {
        return Err(DegenerateGeometry::NoPoints);
    }
    match gradient.kind {
        GradientType::Mesh => Ok(()),
        GradientType::Linear => LinearAxis::new(points, canvas).map(drop),
        GradientType::Radial => RadialGeometry::new(points, canvas).map(drop),
        GradientType::Conic => ConicGeometry::new(points, canvas).map(drop),
    }
}

enum Shader {
    Solid(Rgba8),
    Mesh(MeshShader),
    Linear(LinearShader),
    Radial(RadialShader),
    Conic(ConicGeometry),
}

impl Shader {
    fn build(gradient: &Gradient, canvas: Canvas) -> Shader {
        let points = &gradient.points;
        let Some(first) = points.first() else {
            log::debug!("{} gradient has no points; rendering transparent", gradient.kind);
            return Shader::Solid(Rgba8::TRANSPARENT);
        };

        let built = match gradient.kind {
            GradientType::Mesh => Ok(Shader::Mesh(MeshShader::new(points, canvas))),
            GradientType::Linear => LinearAxis::new(points, canvas)
                .map(|axis| Shader::Linear(LinearShader::new(axis, points, canvas))),
            GradientType::Radial => RadialGeometry::new(points, canvas)
                .map(|geometry| Shader::Radial(RadialShader::new(geometry, points, canvas))),
            GradientType::Conic => ConicGeometry::new(points, canvas).map(Shader::Conic),
        };

        built.unwrap_or_else(|reason| {
            log::debug!("{} gradient is degenerate ({reason}); solid fallback", gradient.kind);
            Shader::Solid(first.color.opaque())
        })
    }
}

/// Shades every pixel at its integer pixel coordinate, one row per task.
fn shade_rows<F>(pixmap: &mut Pixmap, cancel: &CancelToken, shade: F) -> Result<(), RenderError>
where
    F: Fn(Vec2) -> Rgba8 + Sync,
{
    let width = pixmap.width() as usize;
    pixmap
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            let fy = y as f64;
            for (x, px) in row.iter_mut().enumerate() {
                *px = shade(Vec2::new(x as f64, fy));
            }
            Ok(())
        })
}
