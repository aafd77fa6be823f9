use super::Rgb;

/// A single gradient stop along a 1-D axis.
///
/// `t` is the normalized offset; stops built by the evaluator are always in
/// `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f64, color: Rgb) -> Self {
        Self { t, color }
    }
}

/// Ordered stop list with pad spread.
///
/// Semantics follow 2D-canvas `addColorStop`:
/// - stops are sorted by offset; stops sharing an offset keep insertion order
/// - below the first stop / above the last stop the edge color is padded
/// - between two stops the color is interpolated linearly in sRGB
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorStops {
    stops: Vec<ColorStop>,
}

impl ColorStops {
    /// Builds a stop list from stops in insertion order.
    ///
    /// Non-finite offsets are treated as `0.0`.
    pub fn new(stops: impl IntoIterator<Item = ColorStop>) -> Self {
        let mut stops: Vec<ColorStop> = stops
            .into_iter()
            .map(|s| ColorStop::new(if s.t.is_finite() { s.t.clamp(0.0, 1.0) } else { 0.0 }, s.color))
            .collect();
        // `sort_by` is stable, so equal offsets keep insertion order.
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { stops }
    }

    #[inline]
    pub fn as_slice(&self) -> &[ColorStop] {
        &self.stops
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Samples the gradient at `t`.
    ///
    /// Returns `None` only for an empty stop list.
    pub fn sample(&self, t: f64) -> Option<Rgb> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;

        if !t.is_finite() || t <= first.t {
            return Some(first.color);
        }
        if t >= last.t {
            return Some(last.color);
        }

        // First stop strictly beyond `t`; the one before it is at or below `t`.
        let hi = self.stops.partition_point(|s| s.t <= t);
        let a = self.stops[hi - 1];
        let b = self.stops[hi];
        let span = b.t - a.t;
        if span <= 0.0 {
            return Some(b.color);
        }
        Some(a.color.lerp(b.color, (t - a.t) / span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn empty_samples_none() {
        assert_eq!(ColorStops::default().sample(0.5), None);
    }

    #[test]
    fn pads_outside_range() {
        let stops = ColorStops::new([ColorStop::new(0.25, RED), ColorStop::new(0.75, BLUE)]);
        assert_eq!(stops.sample(0.0), Some(RED));
        assert_eq!(stops.sample(1.0), Some(BLUE));
    }

    #[test]
    fn interpolates_inside_range() {
        let stops = ColorStops::new([ColorStop::new(0.0, Rgb::BLACK), ColorStop::new(1.0, Rgb::WHITE)]);
        assert_eq!(stops.sample(0.5), Some(Rgb::new(128, 128, 128)));
        assert_eq!(stops.sample(0.2), Some(Rgb::new(51, 51, 51)));
    }

    #[test]
    fn sorts_stops_and_keeps_ties_in_order() {
        let stops = ColorStops::new([
            ColorStop::new(1.0, BLUE),
            ColorStop::new(0.5, RED),
            ColorStop::new(0.5, Rgb::WHITE),
            ColorStop::new(0.0, Rgb::BLACK),
        ]);
        let order: Vec<Rgb> = stops.as_slice().iter().map(|s| s.color).collect();
        assert_eq!(order, vec![Rgb::BLACK, RED, Rgb::WHITE, BLUE]);

        // Just past the tie we are on the WHITE -> BLUE segment.
        assert_eq!(stops.sample(0.5 + 1e-9), Some(Rgb::WHITE));
    }

    #[test]
    fn single_stop_is_solid() {
        let stops = ColorStops::new([ColorStop::new(0.3, RED)]);
        for t in [0.0, 0.3, 0.9, f64::NAN] {
            assert_eq!(stops.sample(t), Some(RED));
        }
    }

    #[test]
    fn non_finite_offsets_are_zeroed() {
        let stops = ColorStops::new([ColorStop::new(f64::NAN, RED), ColorStop::new(1.0, BLUE)]);
        assert_eq!(stops.as_slice()[0].t, 0.0);
    }
}
