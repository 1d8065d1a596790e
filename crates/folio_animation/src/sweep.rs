//! The gradient sweep
//!
//! A five-band horizontal gradient slides across the whole surface, covers it
//! completely at the midpoint, then slides out the other side. Content is
//! swapped underneath at the midpoint, so the change is never seen.
//!
//! ```text
//!  t = 0ms        400ms         1200ms
//!  |--Entering--|--Exiting-------|  Disposed
//!  -100%        0% (midpoint)    +100%
//! ```
//!
//! A sweep cannot be cancelled once started, and it does not guard against
//! concurrent runs: callers must never start a second sweep over the same
//! surface while one is in flight.

use crate::easing::Easing;
use crate::timeline::{SegmentId, Timeline};

/// Time at which the surface is fully covered and the midpoint callback runs
pub const MIDPOINT_MS: u64 = 400;

/// Time at which the overlay is removed
pub const DISPOSE_MS: u64 = 1200;

/// Band colors, left to right
pub const SWEEP_PALETTE: [&str; 5] = ["#E8B4B8", "#F5E6E8", "#C8D5B9", "#FDFCFA", "#E8D4E0"];

/// Stacking order of an in-page sweep
pub const PAGE_SWEEP_Z_INDEX: u32 = 9999;

/// Stacking order of a cross-page sweep (above everything, including page sweeps)
pub const LINK_SWEEP_Z_INDEX: u32 = 99999;

/// Named stages of a sweep
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepStage {
    /// Sliding in from the left
    Entering,
    /// Full coverage; the midpoint callback is running
    AtMidpoint,
    /// Sliding out to the right
    Exiting,
    /// Full coverage held indefinitely (the page is being replaced)
    Holding,
    /// Overlay removed
    Disposed,
}

/// Which half-sweeps to play
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepMode {
    /// Enter, swap, exit, dispose
    Full,
    /// Enter, hand off, hold coverage
    EntryOnly,
}

/// Snapshot of the overlay for rendering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepFrame {
    /// Horizontal translation in percent of the surface width
    pub offset_percent: f32,
    pub z_index: u32,
    pub stage: SweepStage,
}

impl SweepFrame {
    /// The overlay never intercepts input
    pub const INTERACTIVE: bool = false;

    /// Bands as `(color, start %, end %)`
    pub fn bands() -> [(&'static str, f32, f32); 5] {
        let width = 100.0 / SWEEP_PALETTE.len() as f32;
        std::array::from_fn(|i| (SWEEP_PALETTE[i], i as f32 * width, (i + 1) as f32 * width))
    }
}

/// Midpoint callback, receiving the caller's context
pub type MidpointCallback<C> = Box<dyn FnOnce(&mut C)>;

/// A single-shot sweep over a context `C`
///
/// The midpoint callback receives `&mut C` when it fires, so the owner of the
/// sweep can mutate its own state without sharing it with the closure.
pub struct SweepEffect<C> {
    mode: SweepMode,
    stage: SweepStage,
    elapsed_ms: u64,
    timeline: Timeline,
    enter: SegmentId,
    exit: Option<SegmentId>,
    z_index: u32,
    on_midpoint: Option<MidpointCallback<C>>,
}

impl<C> SweepEffect<C> {
    /// Start a full in-page sweep
    pub fn run(on_midpoint: impl FnOnce(&mut C) + 'static) -> Self {
        Self::start(SweepMode::Full, PAGE_SWEEP_Z_INDEX, Box::new(on_midpoint))
    }

    /// Start an entry-only sweep that hands off at the midpoint and holds
    pub fn run_entry_only(on_midpoint: impl FnOnce(&mut C) + 'static) -> Self {
        Self::start(SweepMode::EntryOnly, LINK_SWEEP_Z_INDEX, Box::new(on_midpoint))
    }

    fn start(mode: SweepMode, z_index: u32, on_midpoint: MidpointCallback<C>) -> Self {
        let mut timeline = Timeline::new();
        let enter = timeline.add(0, MIDPOINT_MS, -100.0, 0.0, Easing::SWEEP);
        let exit = match mode {
            SweepMode::Full => Some(timeline.add(
                MIDPOINT_MS,
                DISPOSE_MS - MIDPOINT_MS,
                0.0,
                100.0,
                Easing::SWEEP,
            )),
            SweepMode::EntryOnly => None,
        };
        tracing::trace!(?mode, z_index, "sweep started");

        Self {
            mode,
            stage: SweepStage::Entering,
            elapsed_ms: 0,
            timeline,
            enter,
            exit,
            z_index,
            on_midpoint: Some(on_midpoint),
        }
    }

    /// Advance the sweep, running the midpoint callback when its time comes.
    ///
    /// A single large step may pass the midpoint and the end; the callback
    /// still runs exactly once, before disposal.
    pub fn advance(&mut self, dt_ms: u64, ctx: &mut C) -> SweepStage {
        if self.stage == SweepStage::Disposed {
            return self.stage;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        self.timeline.advance(dt_ms);

        if self.stage == SweepStage::Entering && self.elapsed_ms >= MIDPOINT_MS {
            self.stage = SweepStage::AtMidpoint;
            tracing::trace!(elapsed_ms = self.elapsed_ms, "sweep midpoint");
            if let Some(callback) = self.on_midpoint.take() {
                callback(ctx);
            }
            self.stage = match self.mode {
                SweepMode::Full => SweepStage::Exiting,
                SweepMode::EntryOnly => SweepStage::Holding,
            };
        }

        if self.stage == SweepStage::Exiting && self.elapsed_ms >= DISPOSE_MS {
            self.stage = SweepStage::Disposed;
            tracing::trace!("sweep disposed");
        }

        self.stage
    }

    pub fn stage(&self) -> SweepStage {
        self.stage
    }

    pub fn mode(&self) -> SweepMode {
        self.mode
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_disposed(&self) -> bool {
        self.stage == SweepStage::Disposed
    }

    /// Whether the midpoint callback has already run
    pub fn midpoint_passed(&self) -> bool {
        self.on_midpoint.is_none()
    }

    /// Current overlay geometry, or `None` once disposed
    pub fn frame(&self) -> Option<SweepFrame> {
        let offset_percent = match self.stage {
            SweepStage::Disposed => return None,
            SweepStage::Entering => self.timeline.value(self.enter)?,
            SweepStage::AtMidpoint | SweepStage::Holding => 0.0,
            SweepStage::Exiting => self.exit.and_then(|id| self.timeline.value(id))?,
        };
        Some(SweepFrame {
            offset_percent,
            z_index: self.z_index,
            stage: self.stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_fires_once_at_400ms() {
        let mut count = 0u32;
        let mut sweep = SweepEffect::run(|count: &mut u32| *count += 1);

        assert_eq!(sweep.advance(399, &mut count), SweepStage::Entering);
        assert_eq!(count, 0);

        assert_eq!(sweep.advance(1, &mut count), SweepStage::Exiting);
        assert_eq!(count, 1);

        for _ in 0..100 {
            sweep.advance(16, &mut count);
        }
        assert_eq!(count, 1);
        assert!(sweep.is_disposed());
    }

    #[test]
    fn test_disposed_exactly_at_1200ms() {
        let mut ctx = ();
        let mut sweep = SweepEffect::run(|_: &mut ()| {});
        sweep.advance(1199, &mut ctx);
        assert_eq!(sweep.stage(), SweepStage::Exiting);
        assert!(sweep.frame().is_some());

        sweep.advance(1, &mut ctx);
        assert!(sweep.is_disposed());
        assert_eq!(sweep.frame(), None);
    }

    #[test]
    fn test_one_large_step_runs_midpoint_before_disposal() {
        let mut log: Vec<String> = Vec::new();
        let mut sweep = SweepEffect::run(|log: &mut Vec<String>| log.push("midpoint".to_string()));
        assert_eq!(sweep.advance(5_000, &mut log), SweepStage::Disposed);
        assert_eq!(log, vec!["midpoint".to_string()]);
    }

    #[test]
    fn test_overlay_travels_left_to_right() {
        let mut ctx = ();
        let mut sweep = SweepEffect::run(|_: &mut ()| {});

        let start = sweep.frame().map(|f| f.offset_percent);
        assert_eq!(start, Some(-100.0));

        sweep.advance(200, &mut ctx);
        let quarter = sweep.frame().map(|f| f.offset_percent).unwrap_or_default();
        assert!(quarter > -100.0 && quarter < 0.0);

        sweep.advance(200, &mut ctx);
        let mid = sweep.frame().map(|f| f.offset_percent).unwrap_or_default();
        assert!(mid.abs() < 1e-3);

        sweep.advance(400, &mut ctx);
        let exiting = sweep.frame().map(|f| f.offset_percent).unwrap_or_default();
        assert!(exiting > 0.0 && exiting < 100.0);
    }

    #[test]
    fn test_entry_only_holds_coverage() {
        let mut url: Option<String> = None;
        let mut sweep =
            SweepEffect::run_entry_only(|url: &mut Option<String>| *url = Some("next.html".to_string()));

        sweep.advance(400, &mut url);
        assert_eq!(url.as_deref(), Some("next.html"));
        assert_eq!(sweep.stage(), SweepStage::Holding);

        sweep.advance(10_000, &mut url);
        assert_eq!(sweep.stage(), SweepStage::Holding);
        let frame = sweep.frame();
        assert_eq!(frame.map(|f| f.offset_percent), Some(0.0));
        assert_eq!(frame.map(|f| f.z_index), Some(LINK_SWEEP_Z_INDEX));
    }

    #[test]
    fn test_gradient_has_five_equal_bands() {
        let bands = SweepFrame::bands();
        assert_eq!(bands[0], ("#E8B4B8", 0.0, 20.0));
        assert_eq!(bands[4].0, "#E8D4E0");
        assert!((bands[4].2 - 100.0).abs() < 1e-4);
        assert!(!SweepFrame::INTERACTIVE);
    }
}
