use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick.
    pub dt: Duration,
    pub now: Instant,
    pub frame_index: u64,
}

/// Frame clock fed by caller-supplied timestamps.
///
/// Delta time is clamped so a stalled or suspended editor does not see a
/// huge first frame, and a tight loop never sees zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self { last: None, frame_index: 0, dt_min, dt_max }
    }

    /// Forgets the previous tick; the next tick reports `dt_max`.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).clamp(self.dt_min, self.dt_max),
            None => self.dt_max,
        };
        self.last = Some(now);

        let ft = FrameTime { dt, now, frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_delta() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();

        let first = clock.tick(t0);
        assert_eq!(first.dt, Duration::from_millis(250));
        assert_eq!(first.frame_index, 0);

        assert_eq!(clock.tick(t0).dt, Duration::from_micros(100));
        assert_eq!(clock.tick(t0 + Duration::from_millis(16)).dt, Duration::from_millis(16));
        assert_eq!(clock.tick(t0 + Duration::from_secs(10)).dt, Duration::from_millis(250));
        assert_eq!(clock.tick(t0 + Duration::from_secs(11)).frame_index, 4);
    }
}
