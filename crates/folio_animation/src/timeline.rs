//! Timeline orchestration for eased value segments

use crate::easing::Easing;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct SegmentId;
}

/// A value animated over a window of the timeline
struct Segment {
    /// Offset in milliseconds from timeline start
    offset_ms: u64,
    duration_ms: u64,
    from: f32,
    to: f32,
    easing: Easing,
}

impl Segment {
    fn value_at(&self, time_ms: u64) -> f32 {
        if time_ms <= self.offset_ms {
            return self.from;
        }
        let local = time_ms - self.offset_ms;
        if self.duration_ms == 0 || local >= self.duration_ms {
            return self.to;
        }
        let progress = self.easing.apply(local as f32 / self.duration_ms as f32);
        self.from + (self.to - self.from) * progress
    }
}

/// A timeline that orchestrates several segments against one playhead
pub struct Timeline {
    segments: SlotMap<SegmentId, Segment>,
    elapsed_ms: u64,
    duration_ms: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            segments: SlotMap::with_key(),
            elapsed_ms: 0,
            duration_ms: 0,
        }
    }

    /// Add a segment at a given offset
    pub fn add(
        &mut self,
        offset_ms: u64,
        duration_ms: u64,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> SegmentId {
        self.duration_ms = self.duration_ms.max(offset_ms + duration_ms);
        self.segments.insert(Segment {
            offset_ms,
            duration_ms,
            from,
            to,
            easing,
        })
    }

    /// Advance the playhead, clamped to the timeline's duration
    pub fn advance(&mut self, dt_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Current value of a segment
    pub fn value(&self, id: SegmentId) -> Option<f32> {
        self.segments.get(id).map(|s| s.value_at(self.elapsed_ms))
    }

    /// Whether the playhead is inside a segment's window
    pub fn is_active(&self, id: SegmentId) -> bool {
        self.segments.get(id).is_some_and(|s| {
            self.elapsed_ms >= s.offset_ms && self.elapsed_ms < s.offset_ms + s.duration_ms
        })
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_covers_every_segment() {
        let mut timeline = Timeline::new();
        timeline.add(0, 400, 0.0, 1.0, Easing::Linear);
        timeline.add(400, 800, 1.0, 2.0, Easing::Linear);
        assert_eq!(timeline.duration_ms(), 1200);
    }

    #[test]
    fn test_segments_hold_their_endpoints_outside_their_window() {
        let mut timeline = Timeline::new();
        let early = timeline.add(0, 100, -100.0, 0.0, Easing::Linear);
        let late = timeline.add(100, 100, 0.0, 100.0, Easing::Linear);

        assert_eq!(timeline.value(early), Some(-100.0));
        assert_eq!(timeline.value(late), Some(0.0));

        timeline.advance(50);
        assert_eq!(timeline.value(early), Some(-50.0));
        assert_eq!(timeline.value(late), Some(0.0));
        assert!(timeline.is_active(early));
        assert!(!timeline.is_active(late));

        timeline.advance(100);
        assert_eq!(timeline.value(early), Some(0.0));
        assert_eq!(timeline.value(late), Some(50.0));
    }

    #[test]
    fn test_playhead_clamps_at_end() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0, 100, 0.0, 1.0, Easing::SWEEP);
        timeline.advance(1_000);
        assert!(timeline.is_finished());
        assert_eq!(timeline.elapsed_ms(), 100);
        assert_eq!(timeline.value(id), Some(1.0));
    }
}
