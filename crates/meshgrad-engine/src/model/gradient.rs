use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ControlPoint;

/// Which field strategy renders a gradient.
///
/// This is the only discriminator; points carry no per-type behavior.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    /// Inverse-distance-weighted blend of every point.
    #[default]
    Mesh,
    /// 1-D gradient along the first → last point axis.
    Linear,
    /// Circular gradient centered on the first point.
    Radial,
    /// Angular sweep around the first point.
    Conic,
}

impl GradientType {
    pub const ALL: [GradientType; 4] =
        [GradientType::Mesh, GradientType::Linear, GradientType::Radial, GradientType::Conic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mesh => "mesh",
            Self::Linear => "linear",
            Self::Radial => "radial",
            Self::Conic => "conic",
        }
    }
}

impl fmt::Display for GradientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for GradientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown gradient type {s:?} (expected mesh, linear, radial or conic)"))
    }
}

/// Editor overlay toggles stored alongside a gradient.
///
/// They do not affect rendering or export.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFlags {
    pub show_handles: bool,
    pub show_lines: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self { show_handles: true, show_lines: false }
    }
}

/// A gradient description: ordered control points plus a type tag.
///
/// Point order matters: the first point anchors linear, radial and conic
/// geometry, the last point closes the linear axis, and order breaks ties
/// between stops that share an offset.
///
/// Serialized form:
/// `{"id": "...", "points": [...], "showHandles": true, "showLines": false, "type": "mesh"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub id: String,
    pub points: Vec<ControlPoint>,
    #[serde(flatten)]
    pub flags: DisplayFlags,
    #[serde(rename = "type")]
    pub kind: GradientType,
}

impl Gradient {
    pub fn new(id: impl Into<String>, kind: GradientType, points: Vec<ControlPoint>) -> Self {
        Self { id: id.into(), points, flags: DisplayFlags::default(), kind }
    }

    /// Same gradient with a different type.
    pub fn with_kind(mut self, kind: GradientType) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Minimum point count for the current type to be meaningful.
    pub fn min_points(&self) -> usize {
        match self.kind {
            GradientType::Mesh | GradientType::Radial | GradientType::Conic => 1,
            GradientType::Linear => 2,
        }
    }
}
