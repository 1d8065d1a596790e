//! Rendered-surface contract for the book
//!
//! The sequencer never touches rendering directly; it asks a [`ViewRegistry`]
//! for capability-scoped changes.

use folio_animation::SweepFrame;

/// Previous/next navigation controls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavButton {
    Prev,
    Next,
}

/// Page spreads, indicators, buttons, labels and the sweep overlay
pub trait ViewRegistry {
    /// Number of page spreads rendered, fixed for the lifetime of the surface
    fn page_count(&self) -> usize;

    /// Whether the indicator container exists
    fn has_indicators(&self) -> bool;

    /// Replace the indicator container's contents with `count` dots
    fn render_indicators(&mut self, count: usize);

    fn set_active_page(&mut self, index: usize, active: bool);

    fn set_indicator_active(&mut self, index: usize, active: bool);

    fn set_button_enabled(&mut self, button: NavButton, enabled: bool);

    /// Left and right page-number labels
    fn set_page_numbers(&mut self, left: u32, right: u32);

    /// Mount or move the sweep overlay identified by `frame.z_index`
    fn show_sweep(&mut self, frame: &SweepFrame);

    /// Remove the sweep overlay at `z_index`
    fn remove_sweep(&mut self, z_index: u32);
}

/// Page-number labels for a spread: `(2i + 1, 2i + 2)`
pub fn page_numbers(index: usize) -> (u32, u32) {
    let left = index as u32 * 2 + 1;
    (left, left + 1)
}
