//! Menu overlay
//!
//! A two-state machine, `CLOSED` and `OPEN`. The trigger opens it; the close
//! control, a click on the overlay background, or Escape close it. Clicking a
//! navigation link closes it after a short delay so the navigation can begin
//! first. Clicks inside the menu content never close it.

use folio_core::events::event_types;
use folio_core::fsm::{EventId, StateId};
use folio_core::{Event, KeyCode, Region, StateMachine, SurfaceError};

pub mod states {
    use folio_core::StateId;

    pub const CLOSED: StateId = 0;
    pub const OPEN: StateId = 1;
}

mod triggers {
    use folio_core::fsm::EventId;

    pub const OPEN: EventId = 1;
    pub const CLOSE: EventId = 2;
}

/// Delay between a link click and the menu closing
pub const LINK_CLOSE_DELAY_MS: u64 = 100;

/// Rendered side of the menu
pub trait MenuSurface {
    /// Whether the overlay root and its trigger are rendered
    fn has_menu(&self) -> bool;

    fn set_menu_open(&mut self, open: bool);

    /// Lock or release page scrolling behind the overlay
    fn set_scroll_locked(&mut self, locked: bool);
}

/// Why the menu is closing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Background,
    Escape,
    Link,
}

pub struct MenuOverlay<M> {
    machine: StateMachine,
    surface: M,
    link_close_delay_ms: u64,
    /// Remaining time before a link-triggered close
    pending_close_ms: Option<u64>,
}

impl<M: MenuSurface> MenuOverlay<M> {
    /// Attach to the surface in the closed state
    pub fn attach(mut surface: M, link_close_delay_ms: u64) -> Result<Self, SurfaceError> {
        if !surface.has_menu() {
            return Err(SurfaceError::MissingRegion("menu overlay"));
        }
        surface.set_menu_open(false);
        surface.set_scroll_locked(false);

        let machine = StateMachine::builder(states::CLOSED)
            .on(states::CLOSED, triggers::OPEN, states::OPEN)
            .on(states::OPEN, triggers::CLOSE, states::CLOSED)
            .build();

        Ok(Self {
            machine,
            surface,
            link_close_delay_ms,
            pending_close_ms: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.machine.is_in(states::OPEN)
    }

    pub fn state(&self) -> StateId {
        self.machine.current_state()
    }

    pub fn open(&mut self) {
        if self.send(triggers::OPEN) {
            tracing::debug!("menu opened");
        }
    }

    pub fn close(&mut self, reason: CloseReason) {
        self.pending_close_ms = None;
        if self.send(triggers::CLOSE) {
            tracing::debug!(?reason, "menu closed");
        }
    }

    /// Whether a link-triggered close is scheduled
    pub fn close_pending(&self) -> bool {
        self.pending_close_ms.is_some()
    }

    /// Handle one surface event; returns `true` when the menu reacted
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::CLICK => match event.target {
                Region::MenuTrigger => {
                    self.open();
                    true
                }
                Region::MenuClose => {
                    self.close(CloseReason::Button);
                    true
                }
                Region::MenuOverlay if self.is_open() => {
                    self.close(CloseReason::Background);
                    true
                }
                Region::MenuLink(_) => {
                    self.pending_close_ms = Some(self.link_close_delay_ms);
                    true
                }
                _ => false,
            },
            event_types::KEY_DOWN if self.is_open() && event.key() == Some(KeyCode::ESCAPE) => {
                self.close(CloseReason::Escape);
                true
            }
            _ => false,
        }
    }

    /// Count down a pending link close
    pub fn advance(&mut self, dt_ms: u64) {
        let Some(remaining) = self.pending_close_ms else {
            return;
        };
        if dt_ms >= remaining {
            self.close(CloseReason::Link);
        } else {
            self.pending_close_ms = Some(remaining - dt_ms);
        }
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    fn send(&mut self, event: EventId) -> bool {
        let before = self.machine.current_state();
        let after = self.machine.send(event);
        if before == after {
            return false;
        }
        let open = after == states::OPEN;
        self.surface.set_menu_open(open);
        self.surface.set_scroll_locked(open);
        true
    }
}
