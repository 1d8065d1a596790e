//! State Machine Runtime
//!
//! Flat state machines for surface components (menu visibility, navigation phase).
//! Transitions are a fixed `(state, event) -> state` table; events with no
//! entry in the table leave the machine where it is.

use rustc_hash::FxHashMap;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event that drives a state machine
pub type EventId = u32;

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: FxHashMap<(StateId, EventId), StateId>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: FxHashMap::default(),
        }
    }

    /// Add a transition (from, event, to); a later entry for the same
    /// `(from, event)` pair replaces the earlier one
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.insert((from, event), to);
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// A state machine instance
pub struct StateMachine {
    current_state: StateId,
    transitions: FxHashMap<(StateId, EventId), StateId>,
}

impl StateMachine {
    /// Create a builder for a state machine
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Send an event, returning the state after it
    pub fn send(&mut self, event: EventId) -> StateId {
        let current = self.current_state;
        if let Some(&to_state) = self.transitions.get(&(current, event)) {
            self.current_state = to_state;
            tracing::trace!(from = current, event, to = to_state, "fsm transition");
        }
        self.current_state
    }
}
