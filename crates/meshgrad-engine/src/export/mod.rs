//! Export pipeline: raster (PNG / JPEG), SVG and CSS.
//!
//! Formats with a native gradient primitive get an analytic description;
//! everything else falls back to the evaluator's pixels.

mod css;
mod raster;
mod svg;

pub use css::{CssOutput, css_angle, to_css};
pub use raster::{Quality, RasterFormat, encode_raster, png_data_url};
pub use svg::{to_svg, to_svg_with};

use crate::coords::Canvas;
use crate::error::ExportError;
use crate::field::{CancelToken, evaluate_with};
use crate::model::Gradient;

/// Requested output encoding.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg(Quality),
    Svg,
    Css,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg(_) => "jpeg",
            Self::Svg => "svg",
            Self::Css => "css",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg(_) => "image/jpeg",
            Self::Svg => "image/svg+xml",
            Self::Css => "text/css",
        }
    }

    fn raster(self) -> Option<RasterFormat> {
        match self {
            Self::Png => Some(RasterFormat::Png),
            Self::Jpeg(q) => Some(RasterFormat::Jpeg(q)),
            Self::Svg | Self::Css => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
}

impl ExportRequest {
    pub fn new(format: ExportFormat, width: u32, height: u32) -> Self {
        Self { format, width, height }
    }

    #[inline]
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

/// A finished export.
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    Raster { bytes: Vec<u8>, mime_type: &'static str },
    Svg(String),
    Css(CssOutput),
}

impl Export {
    /// Bytes suitable for writing to a file.
    ///
    /// Unsupported CSS yields its explanatory comment.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Raster { bytes, .. } => bytes.clone(),
            Self::Svg(svg) => svg.clone().into_bytes(),
            Self::Css(css) => css.to_string().into_bytes(),
        }
    }
}

/// Exports a snapshot of `gradient` as requested.
pub fn export(gradient: &Gradient, request: ExportRequest) -> Result<Export, ExportError> {
    export_with(gradient, request, &CancelToken::new())
}

/// Like [`export`], honoring `cancel` during any render.
pub fn export_with(
    gradient: &Gradient,
    request: ExportRequest,
    cancel: &CancelToken,
) -> Result<Export, ExportError> {
    let canvas = request.canvas();
    log::info!(
        "exporting {} gradient as {} at {}x{}",
        gradient.kind,
        request.format.extension(),
        canvas.width,
        canvas.height
    );

    if let Some(format) = request.format.raster() {
        if canvas.is_empty() {
            return Err(ExportError::EmptyCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        let pixmap = evaluate_with(gradient, canvas, cancel)?;
        let bytes = encode_raster(&pixmap, format)?;
        return Ok(Export::Raster { bytes, mime_type: format.mime_type() });
    }

    match request.format {
        ExportFormat::Svg => Ok(Export::Svg(to_svg_with(gradient, canvas, cancel)?)),
        _ => Ok(Export::Css(to_css(gradient, canvas))),
    }
}
