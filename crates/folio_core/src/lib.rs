//! Folio Core Runtime
//!
//! This crate provides the foundational primitives shared by every Folio crate:
//!
//! - **Event Model**: Surface-level input events addressed to named regions
//! - **Event Dispatch**: A broadcast bus for named notifications (e.g. theme changes)
//! - **State Machines**: Flat table-driven state machines
//! - **Time Injection**: Clocks and a frame clock so timed behaviour is testable
//! - **Audio Capability**: The fire-and-forget audio collaborator
//!
//! # Example
//!
//! ```rust
//! use folio_core::clock::{FrameClock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut frames = FrameClock::new(clock.clone());
//!
//! clock.advance(16);
//! assert_eq!(frames.tick(), 16);
//! ```

pub mod audio;
pub mod clock;
pub mod error;
pub mod events;
pub mod fsm;

pub use audio::{AudioError, AudioPlayer, SilentAudio, Sound};
pub use clock::{Clock, FrameClock, ManualClock, SystemClock};
pub use error::SurfaceError;
pub use events::{Event, EventData, EventDispatcher, EventType, KeyCode, ListenerId, Region};
pub use fsm::{StateId, StateMachine};
