//! Preview scheduling.
//!
//! Edits bump the session revision; [`Preview::frame`] turns a changed
//! revision into at most one [`RenderJob`] per frame interval. Jobs own a
//! snapshot of the gradient and a recycled buffer, so they can run on any
//! thread. Starting a job cancels the previous one, and [`Preview::finish`]
//! only accepts the newest ticket.

use std::time::{Duration, Instant};

use meshgrad_engine::coords::Canvas;
use meshgrad_engine::error::RenderError;
use meshgrad_engine::field::{CancelToken, Pixmap, evaluate_into};
use meshgrad_engine::model::Gradient;

use crate::clock::FrameClock;
use crate::session::Session;

/// Monotonic id of a render request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RenderTicket(u64);

/// A self-contained render of one gradient snapshot.
#[derive(Debug)]
pub struct RenderJob {
    ticket: RenderTicket,
    gradient: Gradient,
    canvas: Canvas,
    cancel: CancelToken,
    buffer: Pixmap,
}

impl RenderJob {
    #[inline]
    pub fn ticket(&self) -> RenderTicket {
        self.ticket
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn run(mut self) -> RenderOutcome {
        let result = evaluate_into(&self.gradient, self.canvas, &mut self.buffer, &self.cancel);
        RenderOutcome { ticket: self.ticket, pixmap: self.buffer, result }
    }
}

#[derive(Debug)]
pub struct RenderOutcome {
    pub ticket: RenderTicket,
    pub pixmap: Pixmap,
    pub result: Result<(), RenderError>,
}

#[derive(Debug)]
pub struct Preview {
    canvas: Canvas,
    interval: Duration,
    clock: FrameClock,
    since_render: Duration,
    seen_revision: Option<u64>,
    dirty: bool,
    issued: u64,
    in_flight: Option<CancelToken>,
    front: Option<Pixmap>,
    spare: Option<Pixmap>,
}

impl Preview {
    pub fn new(canvas: Canvas, interval: Duration) -> Self {
        Self {
            canvas,
            interval,
            clock: FrameClock::new(),
            since_render: interval,
            seen_revision: None,
            dirty: true,
            issued: 0,
            in_flight: None,
            front: None,
            spare: None,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        if canvas != self.canvas {
            self.canvas = canvas;
            self.dirty = true;
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last accepted frame.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.front.as_ref()
    }

    /// Called once per UI frame. Returns a job when the session changed and
    /// a frame interval has passed since the last job was issued.
    pub fn frame(&mut self, now: Instant, session: &Session) -> Option<RenderJob> {
        let ft = self.clock.tick(now);
        self.since_render = self.since_render.saturating_add(ft.dt);

        if self.seen_revision != Some(session.revision()) {
            self.seen_revision = Some(session.revision());
            self.dirty = true;
        }
        if !self.dirty || self.since_render < self.interval {
            return None;
        }

        log::trace!("preview frame {} schedules a render", ft.frame_index);
        Some(self.begin(session.gradient()))
    }

    /// Issues a job for `gradient` right away, cancelling any job in flight.
    pub fn begin(&mut self, gradient: &Gradient) -> RenderJob {
        if let Some(stale) = self.in_flight.take() {
            stale.cancel();
        }

        self.issued += 1;
        self.dirty = false;
        self.since_render = Duration::ZERO;

        let cancel = CancelToken::new();
        self.in_flight = Some(cancel.clone());

        RenderJob {
            ticket: RenderTicket(self.issued),
            gradient: gradient.clone(),
            canvas: self.canvas,
            cancel,
            buffer: self.spare.take().unwrap_or_default(),
        }
    }

    /// Accepts `outcome` if it is the newest job and completed. Returns
    /// whether the visible frame changed.
    pub fn finish(&mut self, outcome: RenderOutcome) -> bool {
        let newest = outcome.ticket == RenderTicket(self.issued);
        if newest {
            self.in_flight = None;
        }

        match (newest, outcome.result) {
            (true, Ok(())) => {
                self.spare = self.front.replace(outcome.pixmap);
                true
            }
            (newest, result) => {
                if let Err(e) = result {
                    log::debug!("preview render {:?} dropped: {e}", outcome.ticket);
                    // The newest frame never landed; render it again.
                    self.dirty |= newest;
                } else {
                    log::debug!("preview render {:?} superseded", outcome.ticket);
                }
                if self.spare.is_none() {
                    self.spare = Some(outcome.pixmap);
                }
                false
            }
        }
    }

    /// Renders synchronously on the calling thread.
    pub fn render_now(&mut self, gradient: &Gradient) -> Result<&Pixmap, RenderError> {
        let outcome = self.begin(gradient).run();
        let result = outcome.result;
        self.finish(outcome);
        result?;
        self.front.as_ref().ok_or(RenderError::Cancelled)
    }
}
