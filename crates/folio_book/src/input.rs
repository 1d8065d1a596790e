//! Input routing
//!
//! Translates raw surface events (swipes, arrow keys, button and indicator
//! clicks) into navigation commands for the [`PageSequencer`].
//!
//! [`PageSequencer`]: crate::sequencer::PageSequencer

use folio_core::events::event_types;
use folio_core::{Event, EventData, KeyCode, Region};

/// Minimum horizontal travel, in pixels, for a touch gesture to count as a swipe
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Navigation request produced by the router
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    GoTo(usize),
}

/// Classify a horizontal gesture. Leftward travel past the threshold goes
/// forward, rightward travel goes back.
pub fn classify_swipe(start_x: f32, end_x: f32, threshold: f32) -> Option<NavCommand> {
    let travel = start_x - end_x;
    if travel > threshold {
        Some(NavCommand::Next)
    } else if -travel > threshold {
        Some(NavCommand::Prev)
    } else {
        None
    }
}

/// Stateful router; remembers where the current touch started
#[derive(Debug)]
pub struct InputRouter {
    swipe_threshold: f32,
    touch_start_x: Option<f32>,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl InputRouter {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe_threshold,
            touch_start_x: None,
        }
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe_threshold
    }

    /// Route one event.
    ///
    /// Arrow keys are dropped while `transitioning`; everything else is
    /// forwarded and left to the sequencer's own gate.
    pub fn route(&mut self, event: &Event, transitioning: bool) -> Option<NavCommand> {
        match event.event_type {
            event_types::TOUCH_START if event.target == Region::Book => {
                if let EventData::Touch { screen_x } = event.data {
                    self.touch_start_x = Some(screen_x);
                }
                None
            }
            event_types::TOUCH_END if event.target == Region::Book => {
                let EventData::Touch { screen_x } = event.data else {
                    return None;
                };
                let start = self.touch_start_x.take()?;
                let command = classify_swipe(start, screen_x, self.swipe_threshold);
                tracing::trace!(start, end = screen_x, ?command, "swipe");
                command
            }
            event_types::KEY_DOWN => {
                if transitioning {
                    return None;
                }
                match event.key()? {
                    KeyCode::RIGHT | KeyCode::DOWN => Some(NavCommand::Next),
                    KeyCode::LEFT | KeyCode::UP => Some(NavCommand::Prev),
                    _ => None,
                }
            }
            event_types::CLICK => match event.target {
                Region::PrevButton => Some(NavCommand::Prev),
                Region::NextButton => Some(NavCommand::Next),
                Region::IndicatorDot(index) => Some(NavCommand::GoTo(index)),
                _ => None,
            },
            _ => None,
        }
    }
}
