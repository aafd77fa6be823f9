//! Error taxonomy for the engine.
//!
//! - [`InvalidColorFormat`]: malformed color text; callers keep their previous value.
//! - [`DegenerateGeometry`]: never propagated out of rendering; the evaluator
//!   substitutes a fallback fill. Exposed so callers can ask ahead of time.
//! - [`RenderError`]: a render that did not complete (cancelled, oversized).
//! - [`ExportError`]: failures at the export boundary (encoding, empty canvas).
//!
//! Unsupported CSS export is not an error; see [`crate::export::CssOutput`].

use std::fmt;

/// Color text that is not exactly six hex digits with an optional `#`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidColorFormat {
    pub input: String,
}

impl InvalidColorFormat {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }
}

impl fmt::Display for InvalidColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: expected 6 hex digits, optionally prefixed by '#'", self.input)
    }
}

impl std::error::Error for InvalidColorFormat {}

/// Geometry that has no well-defined gradient and renders as a fallback fill.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DegenerateGeometry {
    /// The gradient has no control points at all.
    NoPoints,
    /// The strategy needs more points than the gradient has.
    TooFewPoints { needed: usize, found: usize },
    /// First and last point of a linear axis coincide (in pixel space).
    ZeroLengthAxis,
    /// The outer radius of a radial gradient is zero.
    ZeroRadius,
}

impl fmt::Display for DegenerateGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPoints => f.write_str("gradient has no control points"),
            Self::TooFewPoints { needed, found } => {
                write!(f, "gradient needs at least {needed} control points, found {found}")
            }
            Self::ZeroLengthAxis => f.write_str("gradient axis has zero length"),
            Self::ZeroRadius => f.write_str("gradient radius is zero"),
        }
    }
}

impl std::error::Error for DegenerateGeometry {}

/// A render that did not produce a complete pixel buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderError {
    /// The cancellation token fired; the buffer contents are unspecified.
    Cancelled,
    /// `width * height` does not fit in memory addressing.
    TooLarge { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("render cancelled"),
            Self::TooLarge { width, height } => {
                write!(f, "render target {width}x{height} is too large")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Failure at the export boundary.
#[derive(Debug)]
pub enum ExportError {
    /// A raster export was requested with a zero width or height.
    EmptyCanvas { width: u32, height: u32 },
    /// The underlying render did not complete.
    Render(RenderError),
    /// The image encoder rejected the buffer.
    Encode(image::ImageError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCanvas { width, height } => {
                write!(f, "cannot export an empty {width}x{height} canvas")
            }
            Self::Render(e) => write!(f, "export render failed: {e}"),
            Self::Encode(e) => write!(f, "image encoding failed: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyCanvas { .. } => None,
            Self::Render(e) => Some(e),
            Self::Encode(e) => Some(e),
        }
    }
}

impl From<RenderError> for ExportError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        Self::Encode(e)
    }
}
