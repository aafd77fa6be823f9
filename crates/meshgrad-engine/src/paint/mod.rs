//! Paint model shared by the evaluator and the exporters.
//!
//! Scope:
//! - color representation and conversions (sRGB bytes, hex, HSV, HSL)
//! - 1-D color stop lists with pad spread
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::{
    Hsl, Hsv, Rgb, Rgba8, hex_to_hsv, hex_to_rgb, hsl_to_hex, hsv_to_hex, hsv_to_hsl, rgb_to_hex,
};
pub use gradient::{ColorStop, ColorStops};
