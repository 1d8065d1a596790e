//! Custom cursor
//!
//! Tracks the pointer and a handful of visual flags for a drawn cursor. Only
//! enabled on devices with a fine, hovering pointer; touch surfaces keep the
//! platform cursor.

use smallvec::SmallVec;

use folio_core::events::event_types;
use folio_core::{Event, EventData};

/// Pointer capabilities reported by the platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerCapabilities {
    pub hover: bool,
    pub fine: bool,
}

impl PointerCapabilities {
    pub const FINE: Self = Self {
        hover: true,
        fine: true,
    };
    pub const TOUCH: Self = Self {
        hover: false,
        fine: false,
    };

    pub fn supports_custom_cursor(&self) -> bool {
        self.hover && self.fine
    }
}

/// Renders the drawn cursor
pub trait CursorSurface {
    fn render_cursor(&mut self, frame: &CursorFrame);
}

/// What the renderer needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct CursorFrame {
    pub x: f32,
    pub y: f32,
    pub hidden: bool,
    pub classes: SmallVec<[&'static str; 5]>,
}

impl CursorFrame {
    pub fn transform_css(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CursorState {
    x: f32,
    y: f32,
    hidden: bool,
    clicking: bool,
    hovering: bool,
    text_select: bool,
    loading: bool,
}

impl CursorState {
    /// A cursor for the given pointer, or `None` when the platform cursor
    /// should stay
    pub fn for_pointer(caps: PointerCapabilities) -> Option<Self> {
        if !caps.supports_custom_cursor() {
            tracing::debug!(?caps, "coarse pointer, custom cursor disabled");
            return None;
        }
        Some(Self::default())
    }

    /// Update from one surface event.
    ///
    /// For `POINTER_OUT` the event target is the region being entered.
    pub fn handle_event(&mut self, event: &Event) {
        match event.event_type {
            event_types::POINTER_MOVE => {
                if let EventData::Pointer { x, y } = event.data {
                    self.x = x;
                    self.y = y;
                }
                self.hidden = false;
            }
            event_types::POINTER_LEAVE => self.hidden = true,
            event_types::POINTER_DOWN => self.clicking = true,
            event_types::POINTER_UP => self.clicking = false,
            event_types::POINTER_OVER if event.target.is_interactive() => self.hovering = true,
            event_types::POINTER_OUT if !event.target.is_interactive() => self.hovering = false,
            event_types::SELECT_START => self.text_select = true,
            event_types::SELECTION_CHANGE => {
                if let EventData::Selection { empty: true } = event.data {
                    self.text_select = false;
                }
            }
            _ => {}
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn frame(&self) -> CursorFrame {
        let mut classes = SmallVec::new();
        if self.clicking {
            classes.push("clicking");
        }
        if self.hovering {
            classes.push("hovering");
            classes.push("pointer");
        }
        if self.text_select {
            classes.push("text-select");
        }
        if self.loading {
            classes.push("loading");
        }
        CursorFrame {
            x: self.x,
            y: self.y,
            hidden: self.hidden,
            classes,
        }
    }
}
