//! Frame timing.
//!
//! [`FrameClock`] turns wall-clock time into per-frame deltas, enforces a
//! frame-rate cap and keeps a rolling FPS readout. Uses `std::time` only.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new(settings.system.max_fps);
//! loop {
//!     if let Some(dt) = clock.tick() {
//!         system.tick(dt);
//!         system.draw(&mut sink);
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;

const DELTA_WINDOW: usize = 120;

#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    deltas: VecDeque<f32>,
    max_fps: f32,
}

impl FrameClock {
    pub fn new(max_fps: f32) -> Self {
        Self {
            last: None,
            deltas: VecDeque::with_capacity(DELTA_WINDOW),
            max_fps,
        }
    }

    pub fn set_max_fps(&mut self, max_fps: f32) {
        self.max_fps = max_fps;
    }

    /// Sample the clock. Returns the delta to advance by, or `None` when the
    /// frame should be skipped to hold the cap (or on the very first call).
    ///
    /// A skipped frame does not advance the reference instant, so the
    /// skipped time is carried into the next accepted delta.
    pub fn tick(&mut self) -> Option<f32> {
        let now = Instant::now();
        let last = match self.last {
            Some(last) => last,
            None => {
                self.last = Some(now);
                return None;
            }
        };
        let dt = now.duration_since(last).as_secs_f32();
        if self.accept(dt) {
            self.last = Some(now);
            Some(dt)
        } else {
            None
        }
    }

    /// Rolling average frame rate, rounded to whole frames per second.
    pub fn fps(&self) -> f32 {
        match self.average_delta() {
            Some(avg) if avg > 0.0 => (1.0 / avg).round(),
            _ => 0.0,
        }
    }

    fn average_delta(&self) -> Option<f32> {
        if self.deltas.is_empty() {
            return None;
        }
        Some(self.deltas.iter().sum::<f32>() / self.deltas.len() as f32)
    }

    /// Cap check and window bookkeeping. A frame is skipped only while both
    /// the instantaneous and the average delta run faster than the cap, so a
    /// single slow frame does not force a skip afterwards.
    fn accept(&mut self, dt: f32) -> bool {
        let min_dt = 1.0 / self.max_fps;
        let average = self.average_delta().unwrap_or(min_dt);
        if dt < min_dt && average < min_dt {
            return false;
        }
        self.deltas.push_back(dt);
        if self.deltas.len() > DELTA_WINDOW {
            self.deltas.pop_front();
        }
        true
    }
}
