//! Gradient description: control points, type tag, display flags.

mod generate;
mod gradient;
mod point;

pub use generate::{random_color, random_gradient, random_point, random_points, random_position, timestamp_id};
pub use gradient::{DisplayFlags, Gradient, GradientType};
pub use point::{ControlPoint, SAFE_MAX, SAFE_MIN};
