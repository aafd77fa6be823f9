//! Export / copy feedback state.
//!
//! A terminal state (`Succeeded` / `Failed`) is shown for a short while and
//! then reads as `Idle` again. Time is passed in explicitly so callers drive
//! it from their frame clock.

use std::fmt;
use std::time::{Duration, Instant};

pub const REVERT_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ExportStatus {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

impl ExportStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::InProgress => "in progress",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

/// One status indicator (e.g. "copy SVG").
#[derive(Debug, Clone)]
pub struct StatusCell {
    state: ExportStatus,
    since: Option<Instant>,
    revert_after: Duration,
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new(REVERT_AFTER)
    }
}

impl StatusCell {
    pub fn new(revert_after: Duration) -> Self {
        Self { state: ExportStatus::Idle, since: None, revert_after }
    }

    pub fn set(&mut self, state: ExportStatus, now: Instant) {
        self.state = state;
        self.since = Some(now);
    }

    /// Current status as of `now`.
    pub fn get(&self, now: Instant) -> ExportStatus {
        match self.since {
            Some(since)
                if self.state.is_terminal()
                    && now.saturating_duration_since(since) >= self.revert_after =>
            {
                ExportStatus::Idle
            }
            _ => self.state,
        }
    }

    /// Records the outcome of `result` and passes it through.
    pub fn finish<T, E: fmt::Display>(&mut self, result: Result<T, E>, now: Instant) -> Result<T, E> {
        match &result {
            Ok(_) => self.set(ExportStatus::Succeeded, now),
            Err(e) => {
                log::warn!("export failed: {e}");
                self.set(ExportStatus::Failed, now);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_revert_to_idle() {
        let t0 = Instant::now();
        let mut cell = StatusCell::default();
        assert_eq!(cell.get(t0), ExportStatus::Idle);

        cell.set(ExportStatus::Succeeded, t0);
        assert_eq!(cell.get(t0 + Duration::from_millis(1999)), ExportStatus::Succeeded);
        assert_eq!(cell.get(t0 + REVERT_AFTER), ExportStatus::Idle);

        cell.set(ExportStatus::Failed, t0);
        assert_eq!(cell.get(t0 + Duration::from_secs(1)), ExportStatus::Failed);
        assert_eq!(cell.get(t0 + Duration::from_secs(3)), ExportStatus::Idle);
    }

    #[test]
    fn in_progress_does_not_revert() {
        let t0 = Instant::now();
        let mut cell = StatusCell::default();
        cell.set(ExportStatus::InProgress, t0);
        assert_eq!(cell.get(t0 + Duration::from_secs(60)), ExportStatus::InProgress);
    }

    #[test]
    fn finish_records_outcome() {
        let t0 = Instant::now();
        let mut cell = StatusCell::default();
        assert!(cell.finish::<(), _>(Err("boom"), t0).is_err());
        assert_eq!(cell.get(t0), ExportStatus::Failed);
        assert_eq!(cell.finish::<_, String>(Ok(5), t0).unwrap(), 5);
        assert_eq!(cell.get(t0), ExportStatus::Succeeded);
    }
}
