//! Folio Book
//!
//! The interactive book surface: an ordered set of page spreads navigated by
//! swipe, arrow key, indicator dot or prev/next button, each page change
//! masked by a five-band sweep.
//!
//! # Components
//!
//! - [`PageSequencer`]: current spread, the transitioning gate, sweep-masked commits
//! - [`InputRouter`]: raw surface events to [`NavCommand`]s
//! - [`MenuOverlay`]: open/closed menu with scroll lock
//! - [`CursorState`]: drawn cursor for fine pointers
//! - [`LinkTransition`]: entry-only sweep before leaving for another URL
//! - [`Folio`]: wires everything, plus the theme, onto one surface
//!
//! # Headless runs
//!
//! ```rust
//! use folio_book::headless_runner::run_scenario;
//!
//! let report = run_scenario(r#"{
//!     "steps": [
//!         { "type": "key", "key": "ArrowRight" },
//!         { "type": "wait", "ms": 1200 },
//!         { "type": "assert_page", "index": 1 }
//!     ]
//! }"#).unwrap();
//! assert!(!report.is_failed());
//! ```

pub mod config;
pub mod cursor;
pub mod folio;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_scenario;
pub mod input;
pub mod link;
pub mod menu;
pub mod sequencer;
pub mod surface;
pub mod view;

pub use config::{ConfigError, FolioConfig};
pub use cursor::{CursorFrame, CursorState, CursorSurface, PointerCapabilities};
pub use folio::{BookSurface, Environment, Folio};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_loaded_scenario, run_scenario, HeadlessRunConfig};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use input::{InputRouter, NavCommand};
pub use link::{LinkTransition, Navigator, RecordingNavigator};
pub use menu::{CloseReason, MenuOverlay, MenuSurface};
pub use sequencer::PageSequencer;
pub use surface::{MemorySurface, SurfaceModel};
pub use view::{NavButton, ViewRegistry};
