//! meshgrad engine crate.
//!
//! Turns a handful of colored control points into a color field and exports
//! it. Everything here is pure and synchronous; I/O and scheduling live in
//! `meshgrad-editor`.
//!
//! - [`model`]: control points, gradient type and display flags
//! - [`field`]: the per-pixel evaluator (mesh, linear, radial, conic)
//! - [`export`]: PNG / JPEG / SVG / CSS output
//! - [`paint`]: sRGB colors, HSV/HSL views and 1-D color stops

pub mod coords;
pub mod error;
pub mod export;
pub mod field;
pub mod logging;
pub mod model;
pub mod paint;

pub use error::{DegenerateGeometry, ExportError, InvalidColorFormat, RenderError};
pub use export::{CssOutput, Export, ExportFormat, ExportRequest, Quality, export, to_css, to_svg};
pub use field::{CancelToken, Pixmap, evaluate};
pub use model::{ControlPoint, Gradient, GradientType};
pub use paint::Rgb;
