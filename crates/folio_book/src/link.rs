//! Link transitions
//!
//! Leaving the book for another URL covers the surface with an entry-only
//! sweep, hands the URL to the [`Navigator`] at the midpoint and then keeps
//! the surface covered.

use std::cell::RefCell;
use std::rc::Rc;

use folio_animation::{SweepEffect, SweepFrame};

/// Performs a real navigation away from the book
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

/// Navigator that only remembers where it was sent
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str) {
        self.visited.borrow_mut().push(url.to_string());
    }
}

pub struct LinkTransition<N> {
    navigator: N,
    sweep: Option<SweepEffect<N>>,
}

impl<N: Navigator + 'static> LinkTransition<N> {
    pub fn new(navigator: N) -> Self {
        Self {
            navigator,
            sweep: None,
        }
    }

    /// Start covering the surface and navigate to `url` once covered.
    ///
    /// Returns `false` if a navigation is already under way.
    pub fn navigate(&mut self, url: &str) -> bool {
        if self.sweep.is_some() {
            tracing::debug!(url, "navigation already in progress, ignoring");
            return false;
        }
        let url = url.to_string();
        tracing::debug!(%url, "link transition started");
        self.sweep = Some(SweepEffect::run_entry_only(move |nav: &mut N| {
            nav.navigate(&url)
        }));
        true
    }

    pub fn is_active(&self) -> bool {
        self.sweep.is_some()
    }

    /// Overlay frame of the running sweep
    pub fn frame(&self) -> Option<SweepFrame> {
        self.sweep.as_ref()?.frame()
    }

    /// Step the sweep; returns the overlay frame to render, if any
    pub fn advance(&mut self, dt_ms: u64) -> Option<SweepFrame> {
        let sweep = self.sweep.as_mut()?;
        sweep.advance(dt_ms, &mut self.navigator);
        sweep.frame()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
