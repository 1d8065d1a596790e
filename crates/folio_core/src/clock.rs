//! Time sources
//!
//! Every timed behaviour in Folio is advanced explicitly with elapsed
//! milliseconds. A [`FrameClock`] turns any [`Clock`] into per-frame deltas,
//! so real time and test time drive the same code.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Manually advanced clock for deterministic tests and headless runs.
///
/// Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time (never backwards)
    pub fn set(&self, ms: u64) {
        self.now.set(self.now.get().max(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Converts clock readings into frame deltas
pub struct FrameClock<C: Clock> {
    clock: C,
    last_frame: u64,
}

impl<C: Clock> FrameClock<C> {
    pub fn new(clock: C) -> Self {
        let last_frame = clock.now_ms();
        Self { clock, last_frame }
    }

    /// Milliseconds elapsed since the previous tick
    pub fn tick(&mut self) -> u64 {
        let now = self.clock.now_ms();
        let dt = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        dt
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
