//! Page sequencer
//!
//! Owns the current spread index and the transitioning gate. A page change
//! runs a full sweep; the spread swap happens under the sweep's midpoint, and
//! the gate stays closed until the overlay is disposed.

use folio_animation::{SweepEffect, PAGE_SWEEP_Z_INDEX};
use folio_core::{AudioPlayer, SurfaceError, Sound};

use crate::input::NavCommand;
use crate::view::{page_numbers, NavButton, ViewRegistry};

/// Volume of the page-turn cue
pub const PAGE_TURN_VOLUME: f32 = 0.2;

/// The part of the sequencer the sweep midpoint commits into
struct Spreads<V> {
    view: V,
    current: usize,
    total: usize,
    indicators: bool,
}

impl<V: ViewRegistry> Spreads<V> {
    /// Swap the active spread and refresh everything derived from the index
    fn show(&mut self, index: usize) {
        self.view.set_active_page(self.current, false);
        self.view.set_active_page(index, true);
        self.current = index;
        self.refresh();
        tracing::debug!(page = index, "page committed");
    }

    /// Indicators, button states and page numbers. Safe to call repeatedly.
    fn refresh(&mut self) {
        if self.indicators {
            for i in 0..self.total {
                self.view.set_indicator_active(i, i == self.current);
            }
        }
        self.view.set_button_enabled(NavButton::Prev, self.current > 0);
        self.view
            .set_button_enabled(NavButton::Next, self.current + 1 < self.total);
        let (left, right) = page_numbers(self.current);
        self.view.set_page_numbers(left, right);
    }
}

/// Ordered spreads with one active at a time
pub struct PageSequencer<V, A> {
    spreads: Spreads<V>,
    audio: A,
    page_turn_volume: f32,
    sweep: Option<SweepEffect<Spreads<V>>>,
}

impl<V: ViewRegistry + 'static, A: AudioPlayer + 'static> PageSequencer<V, A> {
    /// Mount on the surface, showing spread 0 without a sweep.
    ///
    /// A surface without spreads has nothing to navigate and is rejected.
    pub fn mount(mut view: V, audio: A, page_turn_volume: f32) -> Result<Self, SurfaceError> {
        let total = view.page_count();
        if total == 0 {
            return Err(SurfaceError::Empty("page spreads"));
        }

        let indicators = view.has_indicators();
        if indicators {
            view.render_indicators(total);
        } else {
            tracing::warn!("indicator container not found, indicators disabled");
        }
        for i in 0..total {
            view.set_active_page(i, i == 0);
        }

        let mut spreads = Spreads {
            view,
            current: 0,
            total,
            indicators,
        };
        spreads.refresh();
        tracing::debug!(total, "page sequencer mounted");

        Ok(Self {
            spreads,
            audio,
            page_turn_volume,
            sweep: None,
        })
    }

    pub fn current_page(&self) -> usize {
        self.spreads.current
    }

    pub fn total_pages(&self) -> usize {
        self.spreads.total
    }

    /// True from the start of a page change until its sweep is disposed
    pub fn is_transitioning(&self) -> bool {
        self.sweep.is_some()
    }

    /// Start a transition to `index`.
    ///
    /// Returns `false`, doing nothing, while a transition is running, for an
    /// out-of-range index, or for the current spread.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        if self.is_transitioning() {
            tracing::trace!(index, "page change ignored, transition running");
            return false;
        }
        if index >= self.spreads.total || index == self.spreads.current {
            tracing::trace!(index, "page change ignored");
            return false;
        }

        self.play_page_turn();
        let sweep = SweepEffect::run(move |spreads: &mut Spreads<V>| spreads.show(index));
        if let Some(frame) = sweep.frame() {
            self.spreads.view.show_sweep(&frame);
        }
        self.sweep = Some(sweep);
        tracing::debug!(from = self.spreads.current, to = index, "page transition started");
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.spreads.current + 1 >= self.spreads.total {
            return false;
        }
        self.go_to_page(self.spreads.current + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        if self.spreads.current == 0 {
            return false;
        }
        self.go_to_page(self.spreads.current - 1)
    }

    /// Apply a routed navigation command
    pub fn execute(&mut self, command: NavCommand) -> bool {
        match command {
            NavCommand::Next => self.next_page(),
            NavCommand::Prev => self.prev_page(),
            NavCommand::GoTo(index) => self.go_to_page(index),
        }
    }

    /// Step the running sweep, committing at its midpoint and reopening the
    /// gate once it is disposed
    pub fn advance(&mut self, dt_ms: u64) {
        let Some(sweep) = self.sweep.as_mut() else {
            return;
        };
        sweep.advance(dt_ms, &mut self.spreads);

        match sweep.frame() {
            Some(frame) => self.spreads.view.show_sweep(&frame),
            None => {
                self.spreads.view.remove_sweep(PAGE_SWEEP_Z_INDEX);
                self.sweep = None;
                tracing::trace!("page transition finished");
            }
        }
    }

    pub fn view(&self) -> &V {
        &self.spreads.view
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn play_page_turn(&mut self) {
        self.audio.set_volume(Sound::PageTurn, self.page_turn_volume);
        if let Err(err) = self.audio.play(Sound::PageTurn) {
            tracing::debug!(%err, "page-turn cue refused, ignoring");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::SweepFrame;
    use folio_core::SilentAudio;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct View {
        pages: usize,
        active: Vec<bool>,
        dots: Vec<bool>,
        prev: bool,
        next: bool,
        numbers: (u32, u32),
        overlay: Option<SweepFrame>,
    }

    impl View {
        fn with_pages(pages: usize) -> Self {
            Self {
                pages,
                active: vec![false; pages],
                ..Default::default()
            }
        }
    }

    impl ViewRegistry for View {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn has_indicators(&self) -> bool {
            true
        }

        fn render_indicators(&mut self, count: usize) {
            self.dots = vec![false; count];
        }

        fn set_active_page(&mut self, index: usize, active: bool) {
            self.active[index] = active;
        }

        fn set_indicator_active(&mut self, index: usize, active: bool) {
            self.dots[index] = active;
        }

        fn set_button_enabled(&mut self, button: NavButton, enabled: bool) {
            match button {
                NavButton::Prev => self.prev = enabled,
                NavButton::Next => self.next = enabled,
            }
        }

        fn set_page_numbers(&mut self, left: u32, right: u32) {
            self.numbers = (left, right);
        }

        fn show_sweep(&mut self, frame: &SweepFrame) {
            self.overlay = Some(*frame);
        }

        fn remove_sweep(&mut self, _z_index: u32) {
            self.overlay = None;
        }
    }

    fn mounted(pages: usize) -> PageSequencer<View, SilentAudio> {
        PageSequencer::mount(View::with_pages(pages), SilentAudio, PAGE_TURN_VOLUME).unwrap()
    }

    #[test]
    fn test_mount_shows_first_spread() {
        let seq = mounted(3);
        let view = seq.view();
        assert_eq!(view.active, vec![true, false, false]);
        assert_eq!(view.dots, vec![true, false, false]);
        assert!(!view.prev);
        assert!(view.next);
        assert_eq!(view.numbers, (1, 2));
        assert!(view.overlay.is_none());
        assert!(!seq.is_transitioning());
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let result = PageSequencer::mount(View::with_pages(0), SilentAudio, PAGE_TURN_VOLUME);
        assert!(matches!(result, Err(SurfaceError::Empty(_))));
    }

    #[test]
    fn test_commit_happens_at_midpoint() {
        let mut seq = mounted(3);
        assert!(seq.go_to_page(2));

        seq.advance(399);
        assert_eq!(seq.current_page(), 0);
        assert!(seq.view().overlay.is_some());

        seq.advance(1);
        assert_eq!(seq.current_page(), 2);
        assert_eq!(seq.view().active, vec![false, false, true]);
        assert_eq!(seq.view().numbers, (5, 6));
        assert!(seq.view().prev);
        assert!(!seq.view().next);
        assert!(seq.is_transitioning());

        seq.advance(800);
        assert!(!seq.is_transitioning());
        assert!(seq.view().overlay.is_none());
    }

    #[test]
    fn test_rejected_commands_change_nothing() {
        let mut seq = mounted(3);
        assert!(!seq.go_to_page(0));
        assert!(!seq.go_to_page(3));
        assert!(!seq.prev_page());
        assert!(!seq.is_transitioning());

        assert!(seq.next_page());
        assert!(!seq.next_page());
        assert!(!seq.go_to_page(2));
        seq.advance(1_200);
        assert_eq!(seq.current_page(), 1);
    }

    #[test]
    fn test_single_spread_has_both_buttons_disabled() {
        let seq = mounted(1);
        assert!(!seq.view().prev);
        assert!(!seq.view().next);
    }

    #[test]
    fn test_overlay_is_mounted_with_the_transition() {
        let mut seq = mounted(2);
        assert!(seq.next_page());

        let overlay = seq.view().overlay.unwrap();
        assert_eq!(overlay.offset_percent, -100.0);
        assert_eq!(overlay.z_index, PAGE_SWEEP_Z_INDEX);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut seq = mounted(3);
        let mounted_view = seq.view().clone();
        seq.spreads.refresh();
        assert_eq!(seq.view(), &mounted_view);

        assert!(seq.go_to_page(1));
        seq.advance(400);
        let committed = seq.view().clone();
        seq.spreads.refresh();
        seq.spreads.refresh();
        assert_eq!(seq.view(), &committed);

        seq.advance(800);
        let settled = seq.view().clone();
        assert!(!seq.go_to_page(1));
        seq.spreads.refresh();
        assert_eq!(seq.view(), &settled);
        assert_eq!(settled.dots, vec![false, true, false]);
        assert_eq!(settled.numbers, (3, 4));
    }
}
