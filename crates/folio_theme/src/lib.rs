//! Folio Theme System
//!
//! Day/night theming for the book surface.
//!
//! # Overview
//!
//! - **Mode**: A binary [`ThemeMode`], loaded from the stored preference, else
//!   from the system dark-mode signal, else Day
//! - **Persistence**: A single `"theme"` entry in a [`PreferenceStore`]
//! - **Ambience**: One looping track per mode, cross-faded by an [`AmbientMixer`]
//!   and held silent until the first user interaction
//! - **Notifications**: A `themechange` event carrying the new mode, broadcast to
//!   observers the theme knows nothing about
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use folio_theme::{MemoryStore, ThemeState, ThemeMode};
//!
//! let mut theme = ThemeState::new(MemoryStore::new(), audio, surface, Some(false), Default::default());
//! theme.subscribe(|event| tracing::info!(?event.data, "theme changed"));
//!
//! theme.notify_user_interaction(); // unlocks ambience
//! theme.toggle();                  // Day -> Night, persisted, cross-fading
//! theme.advance(16);
//! ```

pub mod ambience;
pub mod mode;
pub mod state;
pub mod store;

pub use ambience::AmbientMixer;
pub use mode::{ModeParseError, ThemeMode, ToggleIcon};
pub use state::{ThemeState, ThemeSurface};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError, THEME_KEY};
