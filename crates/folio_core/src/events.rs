//! Event model and dispatch
//!
//! Input arrives as [`Event`]s addressed to a [`Region`] of the rendered surface.
//! Named notifications (such as theme changes) are broadcast through an
//! [`EventDispatcher`] to any number of observers.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Pointer moved onto a region
    pub const POINTER_OVER: EventType = 4;
    /// Pointer moved off a region
    pub const POINTER_OUT: EventType = 5;
    /// Pointer left the window entirely
    pub const POINTER_LEAVE: EventType = 6;
    pub const CLICK: EventType = 7;

    pub const TOUCH_START: EventType = 10;
    pub const TOUCH_END: EventType = 11;

    pub const KEY_DOWN: EventType = 20;

    // Text selection events
    pub const SELECT_START: EventType = 30;
    pub const SELECTION_CHANGE: EventType = 31;

    // Notifications
    pub const THEME_CHANGE: EventType = 100;

    /// Name used on the DOM event surface for a notification type
    pub fn name(event_type: EventType) -> Option<&'static str> {
        match event_type {
            THEME_CHANGE => Some("themechange"),
            _ => None,
        }
    }
}

/// Named regions of the rendered surface that events can target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Anything outside the regions below
    #[default]
    Document,
    /// The book area that receives swipe gestures
    Book,
    PrevButton,
    NextButton,
    /// Page indicator dot at the given position
    IndicatorDot(usize),
    MenuTrigger,
    MenuClose,
    /// The menu overlay root (its background)
    MenuOverlay,
    /// Navigation list inside the menu
    MenuNav,
    /// Contact block inside the menu
    MenuContact,
    /// Navigation link inside the menu
    MenuLink(usize),
    ThemeToggle,
    /// Any other interactive control (link, input, `role="button"`, `.clickable`)
    Control(u64),
    /// Non-interactive content
    Content(u64),
}

impl Region {
    /// Whether the region is an interactive control (for cursor hover styling)
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Region::PrevButton
                | Region::NextButton
                | Region::MenuTrigger
                | Region::MenuClose
                | Region::MenuLink(_)
                | Region::ThemeToggle
                | Region::Control(_)
        )
    }
}

/// A surface event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: Region,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Touch {
        /// Horizontal screen coordinate of the changed touch point
        screen_x: f32,
    },
    Key {
        key: KeyCode,
    },
    Selection {
        /// Whether the current selection is empty
        empty: bool,
    },
    Theme {
        is_day: bool,
    },
    None,
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    // Special keys
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Navigation keys
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Map a DOM `KeyboardEvent.key` name to a key code
    pub fn from_key_name(name: &str) -> KeyCode {
        match name {
            "Tab" => Self::TAB,
            "Enter" => Self::ENTER,
            "Escape" | "Esc" => Self::ESCAPE,
            " " | "Space" => Self::SPACE,
            "ArrowLeft" => Self::LEFT,
            "ArrowUp" => Self::UP,
            "ArrowRight" => Self::RIGHT,
            "ArrowDown" => Self::DOWN,
            "Home" => Self::HOME,
            "End" => Self::END,
            "PageUp" => Self::PAGE_UP,
            "PageDown" => Self::PAGE_DOWN,
            _ => Self::UNKNOWN,
        }
    }
}

impl Event {
    /// Create an event with no timestamp
    pub fn new(event_type: EventType, target: Region, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    pub fn click(target: Region) -> Self {
        Self::new(event_types::CLICK, target, EventData::None)
    }

    pub fn key_down(key: KeyCode) -> Self {
        Self::new(event_types::KEY_DOWN, Region::Document, EventData::Key { key })
    }

    pub fn touch_start(target: Region, screen_x: f32) -> Self {
        Self::new(event_types::TOUCH_START, target, EventData::Touch { screen_x })
    }

    pub fn touch_end(target: Region, screen_x: f32) -> Self {
        Self::new(event_types::TOUCH_END, target, EventData::Touch { screen_x })
    }

    pub fn pointer(event_type: EventType, target: Region, x: f32, y: f32) -> Self {
        Self::new(event_type, target, EventData::Pointer { x, y })
    }

    /// Key carried by a key event
    pub fn key(&self) -> Option<KeyCode> {
        match self.data {
            EventData::Key { key } => Some(key),
            _ => None,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event)>;

new_key_type! {
    /// Handle returned by [`EventDispatcher::register`], used to unsubscribe
    pub struct ListenerId;
}

/// Broadcasts events to every handler registered for their type
///
/// Publishers never learn who is listening; observers hold their own state
/// (typically behind `Rc<RefCell<_>>` or `Cell`).
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, (EventType, EventHandler)>,
    by_type: FxHashMap<EventType, Vec<ListenerId>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_type: FxHashMap::default(),
        }
    }

    /// Register an event handler for an event type
    pub fn register<F>(&mut self, event_type: EventType, handler: F) -> ListenerId
    where
        F: Fn(&Event) + 'static,
    {
        let id = self.listeners.insert((event_type, Box::new(handler)));
        self.by_type.entry(event_type).or_default().push(id);
        id
    }

    /// Remove a previously registered handler
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some((event_type, _)) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_type.get_mut(&event_type) {
            ids.retain(|existing| *existing != id);
        }
        true
    }

    /// Dispatch an event to all registered handlers, in registration order
    pub fn dispatch(&self, event: &mut Event) {
        let Some(ids) = self.by_type.get(&event.event_type) else {
            return;
        };
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some((_, handler)) = self.listeners.get(*id) {
                handler(event);
            }
        }
    }

    /// Number of handlers registered for an event type
    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.by_type.get(&event_type).map_or(0, Vec::len)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_reaches_every_listener() {
        let mut dispatcher = EventDispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = seen.clone();
        dispatcher.register(event_types::THEME_CHANGE, move |e| {
            a.borrow_mut().push(("a", e.data.clone()));
        });
        let b = seen.clone();
        dispatcher.register(event_types::THEME_CHANGE, move |e| {
            b.borrow_mut().push(("b", e.data.clone()));
        });

        let mut event = Event::new(
            event_types::THEME_CHANGE,
            Region::Document,
            EventData::Theme { is_day: false },
        );
        dispatcher.dispatch(&mut event);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "a");
        assert_eq!(seen[1], ("b", EventData::Theme { is_day: false }));
    }

    #[test]
    fn test_stop_propagation() {
        let mut dispatcher = EventDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        dispatcher.register(event_types::CLICK, |_| {});
        let c = count.clone();
        dispatcher.register(event_types::CLICK, move |_| *c.borrow_mut() += 1);

        let mut event = Event::click(Region::Document);
        event.stop_propagation();
        dispatcher.dispatch(&mut event);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_unregister() {
        let mut dispatcher = EventDispatcher::new();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let id = dispatcher.register(event_types::CLICK, move |_| *c.borrow_mut() += 1);

        assert_eq!(dispatcher.listener_count(event_types::CLICK), 1);
        assert!(dispatcher.unregister(id));
        assert!(!dispatcher.unregister(id));
        assert_eq!(dispatcher.listener_count(event_types::CLICK), 0);

        dispatcher.dispatch(&mut Event::click(Region::Document));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_key_name("ArrowRight"), KeyCode::RIGHT);
        assert_eq!(KeyCode::from_key_name("Escape"), KeyCode::ESCAPE);
        assert_eq!(KeyCode::from_key_name("q"), KeyCode::UNKNOWN);
    }

    #[test]
    fn test_region_classification() {
        assert!(Region::NextButton.is_interactive());
        assert!(Region::MenuLink(2).is_interactive());
        assert!(!Region::IndicatorDot(0).is_interactive());
    }
}
