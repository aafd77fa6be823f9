//! The working gradient and every edit the editor can make to it.

use std::fmt;
use std::str::FromStr;

use meshgrad_engine::coords::{Canvas, Vec2};
use meshgrad_engine::model::{
    ControlPoint, Gradient, GradientType, random_color, random_gradient, random_points,
    random_position, timestamp_id,
};
use meshgrad_engine::paint::Rgb;

use crate::error::{EditError, StoreError};
use crate::store::{RemoveError, SavedGradients};

/// Pick radius around a control point, in pixels.
pub const SELECT_RADIUS: f64 = 15.0;

/// The editor never lets a gradient drop below this many points.
pub const MIN_POINTS: usize = 2;

/// Max offset of a point added next to the selection, per axis.
const ADD_SPREAD: f64 = 0.1;

/// What [`Session::randomize`] must preserve.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Locks {
    pub colors: bool,
    pub positions: bool,
}

/// Point-count presets.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GridSize {
    #[default]
    OneByTwo,
    TwoByTwo,
    FourByFour,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [Self::OneByTwo, Self::TwoByTwo, Self::FourByFour];

    pub fn point_count(self) -> usize {
        match self {
            Self::OneByTwo => 2,
            Self::TwoByTwo => 4,
            Self::FourByFour => 16,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneByTwo => "1x2",
            Self::TwoByTwo => "2x2",
            Self::FourByFour => "4x4",
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown grid size {s:?} (expected 1x2, 2x2 or 4x4)"))
    }
}

/// Editing state: the working gradient, the selection and the saved list.
///
/// Every gradient mutation bumps [`Session::revision`], which the preview
/// watches. Selection changes do not.
#[derive(Debug)]
pub struct Session {
    gradient: Gradient,
    active: Option<usize>,
    pub locks: Locks,
    grid: GridSize,
    saved: SavedGradients,
    rng: fastrand::Rng,
    revision: u64,
}

impl Session {
    /// Starts from a random two-point mesh.
    pub fn new(saved: SavedGradients, mut rng: fastrand::Rng) -> Self {
        let grid = GridSize::default();
        let gradient = random_gradient(&mut rng, grid.point_count());
        Self { gradient, active: None, locks: Locks::default(), grid, saved, rng, revision: 0 }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_point(&self) -> Option<&ControlPoint> {
        self.active.and_then(|i| self.gradient.points.get(i))
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn saved(&self) -> &SavedGradients {
        &self.saved
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the working gradient wholesale (e.g. opened from a file).
    pub fn set_gradient(&mut self, gradient: Gradient) {
        self.gradient = gradient;
        self.active = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // ── point editing ─────────────────────────────────────────────────────

    /// Selects the first point within [`SELECT_RADIUS`] pixels of the
    /// normalized position `(x, y)`, or clears the selection.
    pub fn select_at(&mut self, x: f64, y: f64, canvas: Canvas) -> Option<usize> {
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        self.active = self.gradient.points.iter().position(|p| {
            let d = Vec2::new((p.x - x) * w, (p.y - y) * h);
            d.length() < SELECT_RADIUS
        });
        self.active
    }

    pub fn deselect(&mut self) {
        self.active = None;
    }

    /// Moves the selected point, clamped to the safe range.
    pub fn move_active(&mut self, x: f64, y: f64) -> Result<(), EditError> {
        let i = self.active.ok_or(EditError::NoSelection)?;
        let moved = ControlPoint { x, y, ..self.gradient.points[i] }.clamped_to_safe();
        self.gradient.points[i] = moved;
        self.touch();
        Ok(())
    }

    /// Recolors the selected point from hex text. Malformed text leaves the
    /// previous color in place.
    pub fn recolor_active(&mut self, hex: &str) -> Result<Rgb, EditError> {
        let i = self.active.ok_or(EditError::NoSelection)?;
        let color = Rgb::from_hex(hex)?;
        self.gradient.points[i].color = color;
        self.touch();
        Ok(color)
    }

    /// Adds a random-colored point at the center, or near the selected point.
    /// Returns its index.
    pub fn add_point(&mut self) -> usize {
        let (x, y) = match self.active_point().copied() {
            None => (0.5, 0.5),
            Some(p) => (
                p.x + (self.rng.f64() - 0.5) * 2.0 * ADD_SPREAD,
                p.y + (self.rng.f64() - 0.5) * 2.0 * ADD_SPREAD,
            ),
        };
        let color = random_color(&mut self.rng);
        self.gradient.points.push(ControlPoint::new(x, y, color).clamped_to_safe());
        self.touch();
        self.gradient.points.len() - 1
    }

    /// Removes the selected point.
    pub fn remove_active(&mut self) -> Result<ControlPoint, EditError> {
        if self.gradient.points.len() <= MIN_POINTS {
            return Err(EditError::TooFewPoints { min: MIN_POINTS });
        }
        let i = self.active.take().ok_or(EditError::NoSelection)?;
        let removed = self.gradient.points.remove(i);
        self.touch();
        Ok(removed)
    }

    // ── whole-gradient edits ──────────────────────────────────────────────

    /// Switches to a point-count preset with a fresh random mesh.
    pub fn set_grid(&mut self, grid: GridSize) {
        self.grid = grid;
        self.gradient = random_gradient(&mut self.rng, grid.point_count());
        self.active = None;
        self.touch();
    }

    /// Re-rolls the points, honoring [`Locks`]. The type is kept.
    pub fn randomize(&mut self) {
        let old = &self.gradient.points;
        let count = old.len().max(MIN_POINTS);

        let points = match (self.locks.colors, self.locks.positions) {
            (true, true) => old.clone(),
            (true, false) => (0..count)
                .map(|i| {
                    let pos = random_position(&mut self.rng);
                    let color = old.get(i).map_or_else(|| random_color(&mut self.rng), |p| p.color);
                    ControlPoint::new(pos.x, pos.y, color)
                })
                .collect(),
            (false, true) => {
                let mut points: Vec<ControlPoint> = old
                    .iter()
                    .map(|p| ControlPoint { color: random_color(&mut self.rng), ..*p })
                    .collect();
                let missing = count - points.len();
                points.extend(random_points(&mut self.rng, missing));
                points
            }
            (false, false) => random_points(&mut self.rng, count),
        };

        self.gradient.points = points;
        self.active = None;
        self.touch();
    }

    /// Changes the gradient type.
    ///
    /// Any non-mesh type restarts from two random points (keeping the first
    /// two colors when colors are locked) on the 1x2 preset. Switching to mesh
    /// keeps the points.
    pub fn set_kind(&mut self, kind: GradientType) {
        if kind != GradientType::Mesh {
            let colors: Vec<Rgb> = (0..MIN_POINTS)
                .map(|i| match self.gradient.points.get(i) {
                    Some(p) if self.locks.colors => p.color,
                    _ => random_color(&mut self.rng),
                })
                .collect();
            self.gradient.points = colors
                .into_iter()
                .map(|color| {
                    let pos = random_position(&mut self.rng);
                    ControlPoint::new(pos.x, pos.y, color)
                })
                .collect();
            self.grid = GridSize::OneByTwo;
            self.active = None;
        }
        self.gradient.kind = kind;
        self.touch();
    }

    pub fn toggle_handles(&mut self) -> bool {
        self.gradient.flags.show_handles ^= true;
        self.touch();
        self.gradient.flags.show_handles
    }

    pub fn toggle_lines(&mut self) -> bool {
        self.gradient.flags.show_lines ^= true;
        self.touch();
        self.gradient.flags.show_lines
    }

    // ── saved gradients ───────────────────────────────────────────────────

    /// Saves a copy of the working gradient under a fresh id and returns it.
    pub fn save(&mut self) -> Result<String, StoreError> {
        let snapshot = Gradient { id: timestamp_id(), ..self.gradient.clone() };
        let id = self.saved.push(snapshot)?;
        log::info!("saved gradient {id}");
        Ok(id)
    }

    /// Makes a saved gradient the working one.
    pub fn load(&mut self, id: &str) -> Result<(), EditError> {
        let gradient = self
            .saved
            .get(id)
            .cloned()
            .ok_or_else(|| EditError::UnknownGradient(id.to_owned()))?;
        self.set_gradient(gradient);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Gradient, RemoveError> {
        let removed = self.saved.remove(id)?;
        log::info!("deleted saved gradient {id}");
        Ok(removed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use meshgrad_engine::model::{SAFE_MAX, SAFE_MIN};

    use super::*;
    use crate::store::Store;

    /// Session backed by a store path that is never written unless a test saves.
    pub(crate) fn session(seed: u64) -> Session {
        let path = std::env::temp_dir().join(format!("meshgrad-session-{seed}-unused.json"));
        Session::new(SavedGradients::open(Store::new(path)), fastrand::Rng::with_seed(seed))
    }

    fn session_in(dir: &tempfile::TempDir, seed: u64) -> Session {
        let store = Store::new(dir.path().join("saved.json"));
        Session::new(SavedGradients::open(store), fastrand::Rng::with_seed(seed))
    }

    fn in_safe_range(p: &ControlPoint) -> bool {
        (SAFE_MIN..=SAFE_MAX).contains(&p.x) && (SAFE_MIN..=SAFE_MAX).contains(&p.y)
    }

    #[test]
    fn starts_with_two_point_mesh() {
        let s = session(1);
        assert_eq!(s.gradient().points.len(), 2);
        assert_eq!(s.gradient().kind, GradientType::Mesh);
        assert_eq!(s.active(), None);
    }

    #[test]
    fn select_uses_pixel_radius() {
        let mut s = session(2);
        s.set_gradient(Gradient::new(
            "sel",
            GradientType::Mesh,
            vec![
                ControlPoint::new(0.2, 0.2, Rgb::BLACK),
                ControlPoint::new(0.8, 0.8, Rgb::WHITE),
            ],
        ));
        let canvas = Canvas::new(500, 500);

        // 14 px away in x.
        assert_eq!(s.select_at(0.8 + 14.0 / 500.0, 0.8, canvas), Some(1));
        // 16 px away.
        assert_eq!(s.select_at(0.2, 0.2 + 16.0 / 500.0, canvas), None);
    }

    #[test]
    fn move_clamps_to_safe_range() {
        let mut s = session(3);
        assert_eq!(s.move_active(0.5, 0.5), Err(EditError::NoSelection));

        s.active = Some(0);
        s.move_active(-3.0, 1.5).unwrap();
        let p = s.gradient().points[0];
        assert_eq!((p.x, p.y), (SAFE_MIN, SAFE_MAX));
    }

    #[test]
    fn invalid_recolor_keeps_previous_color() {
        let mut s = session(4);
        s.active = Some(1);
        let before = s.gradient().points[1].color;
        let revision = s.revision();

        assert!(matches!(s.recolor_active("#12345"), Err(EditError::InvalidColor(_))));
        assert_eq!(s.gradient().points[1].color, before);
        assert_eq!(s.revision(), revision);

        assert_eq!(s.recolor_active("00FF7f").unwrap(), Rgb::new(0, 255, 127));
        assert_eq!(s.gradient().points[1].color, Rgb::new(0, 255, 127));
    }

    #[test]
    fn add_point_at_center_or_near_selection() {
        let mut s = session(5);
        let i = s.add_point();
        let p = s.gradient().points[i];
        assert_eq!((p.x, p.y), (0.5, 0.5));

        s.active = Some(0);
        let anchor = s.gradient().points[0];
        for _ in 0..50 {
            let i = s.add_point();
            let p = s.gradient().points[i];
            assert!(in_safe_range(&p));
            assert!((p.x - anchor.x).abs() <= ADD_SPREAD + 1e-12);
            assert!((p.y - anchor.y).abs() <= ADD_SPREAD + 1e-12);
        }
    }

    #[test]
    fn remove_refuses_below_minimum() {
        let mut s = session(6);
        s.active = Some(0);
        assert_eq!(s.remove_active(), Err(EditError::TooFewPoints { min: 2 }));
        assert_eq!(s.gradient().points.len(), 2);

        s.add_point();
        s.active = None;
        assert_eq!(s.remove_active(), Err(EditError::NoSelection));

        s.active = Some(2);
        s.remove_active().unwrap();
        assert_eq!(s.gradient().points.len(), 2);
        assert_eq!(s.active(), None);
    }

    #[test]
    fn grid_presets_set_point_count() {
        let mut s = session(7);
        s.set_kind(GradientType::Conic);
        for (grid, n) in [(GridSize::TwoByTwo, 4), (GridSize::FourByFour, 16), (GridSize::OneByTwo, 2)] {
            s.set_grid(grid);
            assert_eq!(s.gradient().points.len(), n);
            assert_eq!(s.gradient().kind, GradientType::Mesh);
            assert!(s.gradient().points.iter().all(in_safe_range));
        }
    }

    #[test]
    fn randomize_honors_locks() {
        let mut s = session(8);
        s.set_grid(GridSize::TwoByTwo);
        s.set_kind(GradientType::Mesh);
        let before = s.gradient().points.clone();

        s.locks = Locks { colors: true, positions: true };
        s.randomize();
        assert_eq!(s.gradient().points, before);

        s.locks = Locks { colors: true, positions: false };
        s.randomize();
        let after: Vec<Rgb> = s.gradient().points.iter().map(|p| p.color).collect();
        assert_eq!(after, before.iter().map(|p| p.color).collect::<Vec<_>>());
        assert_ne!(s.gradient().points, before);

        let before = s.gradient().points.clone();
        s.locks = Locks { colors: false, positions: true };
        s.randomize();
        for (a, b) in s.gradient().points.iter().zip(&before) {
            assert_eq!((a.x, a.y), (b.x, b.y));
        }

        s.locks = Locks::default();
        s.randomize();
        assert_eq!(s.gradient().points.len(), 4);
    }

    #[test]
    fn randomize_keeps_type_and_clears_selection() {
        let mut s = session(9);
        s.set_kind(GradientType::Radial);
        s.active = Some(0);
        s.randomize();
        assert_eq!(s.gradient().kind, GradientType::Radial);
        assert_eq!(s.active(), None);
    }

    #[test]
    fn set_kind_resets_points_for_non_mesh() {
        let mut s = session(10);
        s.set_grid(GridSize::FourByFour);
        let colors: Vec<Rgb> = s.gradient().points.iter().take(2).map(|p| p.color).collect();

        s.locks.colors = true;
        s.set_kind(GradientType::Linear);
        assert_eq!(s.gradient().points.len(), 2);
        assert_eq!(s.grid(), GridSize::OneByTwo);
        let kept: Vec<Rgb> = s.gradient().points.iter().map(|p| p.color).collect();
        assert_eq!(kept, colors);

        let points = s.gradient().points.clone();
        s.set_kind(GradientType::Mesh);
        assert_eq!(s.gradient().points, points);
    }

    #[test]
    fn toggles_flip_flags() {
        let mut s = session(11);
        assert!(!s.toggle_handles());
        assert!(s.toggle_lines());
        assert!(!s.gradient().flags.show_handles);
    }

    #[test]
    fn save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session_in(&dir, 12);
        s.set_kind(GradientType::Conic);
        let snapshot = s.gradient().clone();

        let id = s.save().unwrap();
        assert_ne!(id, "");
        assert_eq!(s.saved().len(), 1);

        s.set_grid(GridSize::FourByFour);
        s.load(&id).unwrap();
        assert_eq!(s.gradient().points, snapshot.points);
        assert_eq!(s.gradient().kind, GradientType::Conic);
        assert_eq!(s.gradient().id, id);

        assert!(matches!(s.load("nope"), Err(EditError::UnknownGradient(_))));
        s.delete(&id).unwrap();
        assert!(s.saved().is_empty());

        let reopened = SavedGradients::open(Store::new(dir.path().join("saved.json")));
        assert!(reopened.is_empty());
    }

    #[test]
    fn grid_size_parses() {
        assert_eq!("4x4".parse::<GridSize>().unwrap(), GridSize::FourByFour);
        assert!("3x3".parse::<GridSize>().is_err());
    }
}
