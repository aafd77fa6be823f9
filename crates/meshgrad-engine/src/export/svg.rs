//! SVG export.
//!
//! Linear and radial gradients map onto native SVG paint servers in pixel
//! space, built from the same [`LinearAxis`] / [`RadialGeometry`] the evaluator
//! uses so the rasterized SVG matches the preview. SVG has no conic or
//! scattered-point paint server, so those embed the evaluator's raster as a
//! base64 PNG.

use xmlwriter::XmlWriter;

use crate::coords::Canvas;
use crate::error::ExportError;
use crate::field::{CancelToken, LinearAxis, RadialGeometry, evaluate_with};
use crate::model::{Gradient, GradientType};
use crate::paint::{ColorStops, Rgb};

use super::raster::png_data_url;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const GRADIENT_ID: &str = "grad1";

/// Exports `gradient` as a standalone `width × height` SVG document.
pub fn to_svg(gradient: &Gradient, width: u32, height: u32) -> Result<String, ExportError> {
    to_svg_with(gradient, Canvas::new(width, height), &CancelToken::new())
}

/// Like [`to_svg`], with a cancellation token for the raster fallback.
pub fn to_svg_with(
    gradient: &Gradient,
    canvas: Canvas,
    cancel: &CancelToken,
) -> Result<String, ExportError> {
    let body = Body::build(gradient, canvas, cancel)?;

    let mut xml = XmlWriter::new(xmlwriter::Options::default());
    xml.start_element("svg");
    xml.write_attribute("xmlns", SVG_NS);
    xml.write_attribute("width", &canvas.width);
    xml.write_attribute("height", &canvas.height);
    xml.write_attribute_fmt("viewBox", format_args!("0 0 {} {}", canvas.width, canvas.height));

    match &body {
        Body::Empty => xml.write_comment("gradient has no control points"),
        Body::Solid(color) => write_fill_rect(&mut xml, &color.to_hex()),
        Body::Linear(axis, stops) => {
            let (start, end) = (axis.start(), axis.end());
            xml.start_element("defs");
            xml.start_element("linearGradient");
            xml.write_attribute("id", GRADIENT_ID);
            xml.write_attribute("gradientUnits", "userSpaceOnUse");
            xml.write_attribute("x1", &start.x);
            xml.write_attribute("y1", &start.y);
            xml.write_attribute("x2", &end.x);
            xml.write_attribute("y2", &end.y);
            write_stops(&mut xml, stops);
            xml.end_element();
            xml.end_element();
            write_fill_rect(&mut xml, &format!("url(#{GRADIENT_ID})"));
        }
        Body::Radial(geometry, stops) => {
            let center = geometry.center();
            xml.start_element("defs");
            xml.start_element("radialGradient");
            xml.write_attribute("id", GRADIENT_ID);
            xml.write_attribute("gradientUnits", "userSpaceOnUse");
            xml.write_attribute("cx", &center.x);
            xml.write_attribute("cy", &center.y);
            xml.write_attribute("r", &geometry.radius());
            write_stops(&mut xml, stops);
            xml.end_element();
            xml.end_element();
            write_fill_rect(&mut xml, &format!("url(#{GRADIENT_ID})"));
        }
        Body::Raster(url) => {
            xml.start_element("image");
            xml.write_attribute("width", &canvas.width);
            xml.write_attribute("height", &canvas.height);
            xml.write_attribute("preserveAspectRatio", "none");
            xml.write_attribute("href", url);
            xml.end_element();
        }
    }

    Ok(xml.end_document())
}

enum Body {
    Empty,
    Solid(Rgb),
    Linear(LinearAxis, ColorStops),
    Radial(RadialGeometry, ColorStops),
    Raster(String),
}

impl Body {
    fn build(gradient: &Gradient, canvas: Canvas, cancel: &CancelToken) -> Result<Self, ExportError> {
        let points = &gradient.points;
        let Some(first) = points.first() else {
            return Ok(Self::Empty);
        };

        let body = match gradient.kind {
            GradientType::Linear => match LinearAxis::new(points, canvas) {
                Ok(axis) => Self::Linear(axis, axis.stops(points, canvas)),
                Err(e) => {
                    log::debug!("svg: linear falls back to solid fill: {e}");
                    Self::Solid(first.color)
                }
            },
            GradientType::Radial => match RadialGeometry::new(points, canvas) {
                Ok(geometry) => Self::Radial(geometry, geometry.stops(points, canvas)),
                Err(e) => {
                    log::debug!("svg: radial falls back to solid fill: {e}");
                    Self::Solid(first.color)
                }
            },
            GradientType::Conic | GradientType::Mesh => {
                if canvas.is_empty() {
                    return Err(ExportError::EmptyCanvas {
                        width: canvas.width,
                        height: canvas.height,
                    });
                }
                let pixmap = evaluate_with(gradient, canvas, cancel)?;
                Self::Raster(png_data_url(&pixmap)?)
            }
        };
        Ok(body)
    }
}

fn write_stops(xml: &mut XmlWriter, stops: &ColorStops) {
    for stop in stops.as_slice() {
        xml.start_element("stop");
        xml.write_attribute("offset", &stop.t);
        xml.write_attribute("stop-color", &stop.color);
        xml.end_element();
    }
}

fn write_fill_rect(xml: &mut XmlWriter, fill: &str) {
    xml.start_element("rect");
    xml.write_attribute("width", "100%");
    xml.write_attribute("height", "100%");
    xml.write_attribute("fill", fill);
    xml.end_element();
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use resvg::tiny_skia;
    use resvg::usvg;

    use super::*;
    use crate::field::evaluate;
    use crate::model::ControlPoint;

    fn gradient(kind: GradientType, points: &[(f64, f64, Rgb)]) -> Gradient {
        Gradient::new(
            "svg",
            kind,
            points.iter().map(|&(x, y, c)| ControlPoint::new(x, y, c)).collect(),
        )
    }

    /// Rasterizes `svg` with resvg and checks every pixel against the evaluator.
    fn assert_parity(g: &Gradient, width: u32, height: u32, tolerance: u8) {
        let svg = to_svg(g, width, height).unwrap();
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
        let mut target = tiny_skia::Pixmap::new(width, height).unwrap();
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut target.as_mut());

        let expected = evaluate(g, width, height);
        let mut worst = 0u8;
        for y in 0..height {
            for x in 0..width {
                let a = expected.pixel(x, y).unwrap();
                let b = target.pixel(x, y).unwrap();
                assert_eq!(b.alpha(), 255, "uncovered pixel at ({x}, {y})");
                for (ca, cb) in [(a.r, b.red()), (a.g, b.green()), (a.b, b.blue())] {
                    worst = worst.max(ca.abs_diff(cb));
                }
            }
        }
        assert!(worst <= tolerance, "max channel difference {worst} > {tolerance}");
    }

    #[test]
    fn linear_matches_evaluator() {
        let g = gradient(
            GradientType::Linear,
            &[
                (0.1, 0.2, Rgb::new(255, 0, 0)),
                (0.5, 0.9, Rgb::new(0, 255, 0)),
                (0.9, 0.7, Rgb::new(0, 0, 255)),
            ],
        );
        assert_parity(&g, 96, 64, 10);
    }

    #[test]
    fn radial_matches_evaluator() {
        let g = gradient(
            GradientType::Radial,
            &[
                (0.5, 0.5, Rgb::WHITE),
                (0.8, 0.5, Rgb::new(200, 40, 10)),
                (0.6, 0.6, Rgb::new(10, 40, 200)),
            ],
        );
        assert_parity(&g, 160, 160, 12);
    }

    #[test]
    fn linear_document_shape() {
        let g = gradient(
            GradientType::Linear,
            &[(0.0, 0.5, Rgb::BLACK), (1.0, 0.5, Rgb::WHITE)],
        );
        let svg = to_svg(&g, 200, 100).unwrap();
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"<linearGradient id="grad1" gradientUnits="userSpaceOnUse" x1="0" y1="50" x2="200" y2="50">"#));
        assert!(svg.contains(r##"<stop offset="0" stop-color="#000000"/>"##));
        assert!(svg.contains(r##"<stop offset="1" stop-color="#ffffff"/>"##));
        assert!(svg.contains(r#"fill="url(#grad1)""#));
    }

    #[test]
    fn degenerate_linear_is_solid_rect() {
        let g = gradient(
            GradientType::Linear,
            &[(0.3, 0.3, Rgb::new(1, 2, 3)), (0.3, 0.3, Rgb::WHITE)],
        );
        let svg = to_svg(&g, 10, 10).unwrap();
        assert!(!svg.contains("linearGradient"));
        assert!(svg.contains(r##"fill="#010203""##));
    }

    #[test]
    fn empty_gradient_is_commented_document() {
        let g = gradient(GradientType::Radial, &[]);
        let svg = to_svg(&g, 10, 10).unwrap();
        assert!(svg.contains("<!--"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn conic_embeds_evaluator_raster() {
        let g = gradient(
            GradientType::Conic,
            &[
                (0.5, 0.5, Rgb::WHITE),
                (0.9, 0.5, Rgb::new(255, 0, 0)),
                (0.1, 0.5, Rgb::new(0, 0, 255)),
            ],
        );
        let svg = to_svg(&g, 32, 24).unwrap();
        let start = svg.find("data:image/png;base64,").unwrap() + "data:image/png;base64,".len();
        let end = start + svg[start..].find('"').unwrap();
        let png = base64::engine::general_purpose::STANDARD.decode(&svg[start..end]).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw().as_slice(), evaluate(&g, 32, 24).as_bytes());
    }

    #[test]
    fn mesh_on_empty_canvas_fails() {
        let g = gradient(GradientType::Mesh, &[(0.5, 0.5, Rgb::WHITE)]);
        assert!(matches!(to_svg(&g, 0, 10), Err(ExportError::EmptyCanvas { .. })));
    }

    #[test]
    fn cancelled_raster_fallback_fails() {
        let g = gradient(GradientType::Mesh, &[(0.5, 0.5, Rgb::WHITE), (0.1, 0.1, Rgb::BLACK)]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = to_svg_with(&g, Canvas::new(16, 16), &cancel);
        assert!(matches!(result, Err(ExportError::Render(_))));
    }
}
