//! Coordinate types shared by the evaluator and the exporters.
//!
//! Canonical space:
//! - control points: unit square, origin top-left, +X right, +Y down
//! - pixel space: the same axes scaled by the target [`Canvas`]

mod canvas;
mod vec2;

pub use canvas::Canvas;
pub use vec2::Vec2;
