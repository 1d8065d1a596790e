//! Theme state service
//!
//! Owns the current [`ThemeMode`]. Constructed once at start-up and handed to
//! whoever needs it; there is no global instance.

use folio_animation::FadeSettings;
use folio_core::events::event_types;
use folio_core::{AudioPlayer, Event, EventData, EventDispatcher, ListenerId, Region};

use crate::ambience::AmbientMixer;
use crate::mode::{ThemeMode, ToggleIcon};
use crate::store::{PreferenceStore, THEME_KEY};

/// Visual side of the theme on the rendered surface
pub trait ThemeSurface {
    /// Set or clear the night marker on the root surface
    fn set_night_marker(&mut self, night: bool);

    /// Opacity of the day and night particle layers
    fn set_particle_opacity(&mut self, day: f32, night: f32);

    /// Whether the toggle control (and its icon) is rendered
    fn has_toggle(&self) -> bool;

    fn set_toggle_icon(&mut self, icon: ToggleIcon);
}

/// Day/night theme state
pub struct ThemeState<S: PreferenceStore, A: AudioPlayer, R: ThemeSurface> {
    mode: ThemeMode,
    store: S,
    mixer: AmbientMixer<A>,
    surface: R,
    observers: EventDispatcher,
    /// The first-interaction gate fires only once
    interaction_seen: bool,
}

impl<S: PreferenceStore, A: AudioPlayer, R: ThemeSurface> ThemeState<S, A, R> {
    /// Load the mode and apply it to the surface.
    ///
    /// `prefers_dark` is the system color-scheme signal, `None` when the
    /// platform cannot tell.
    pub fn new(
        store: S,
        audio: A,
        surface: R,
        prefers_dark: Option<bool>,
        fade: FadeSettings,
    ) -> Self {
        let mode = load_mode(&store, prefers_dark);
        if !surface.has_toggle() {
            tracing::warn!("theme toggle not found, toggle icon disabled");
        }

        let mut state = Self {
            mode,
            store,
            mixer: AmbientMixer::new(audio, fade),
            surface,
            observers: EventDispatcher::new(),
            interaction_seen: false,
        };
        state.apply_visuals();
        tracing::debug!(%mode, "theme initialized");
        state
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_day(&self) -> bool {
        self.mode.is_day()
    }

    /// Flip the mode: re-apply visuals, persist, re-evaluate ambience, notify
    pub fn toggle(&mut self) {
        self.mode = self.mode.toggle();
        tracing::debug!(mode = %self.mode, "theme toggled");

        self.apply_visuals();
        self.persist();
        self.mixer.apply(self.mode);
        self.broadcast();
    }

    /// First user interaction anywhere; unlocks ambience once
    pub fn notify_user_interaction(&mut self) {
        if self.interaction_seen {
            return;
        }
        self.interaction_seen = true;
        if !self.mixer.is_enabled() {
            self.mixer.enable(self.mode);
        }
    }

    /// Turn ambience on or off explicitly
    pub fn toggle_sound(&mut self) {
        if self.mixer.is_enabled() {
            self.mixer.disable();
        } else {
            self.mixer.enable(self.mode);
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.mixer.is_enabled()
    }

    /// Step ambience fades
    pub fn advance(&mut self, dt_ms: u64) {
        self.mixer.advance(dt_ms);
    }

    /// Observe mode changes. Handlers receive a `THEME_CHANGE` event carrying
    /// [`EventData::Theme`].
    pub fn subscribe<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&Event) + 'static,
    {
        self.observers.register(event_types::THEME_CHANGE, handler)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.observers.unregister(id)
    }

    pub fn mixer(&self) -> &AmbientMixer<A> {
        &self.mixer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    fn apply_visuals(&mut self) {
        self.surface.set_night_marker(!self.mode.is_day());
        let (day, night) = self.mode.particle_opacity();
        self.surface.set_particle_opacity(day, night);
        if self.surface.has_toggle() {
            self.surface.set_toggle_icon(self.mode.toggle_icon());
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.set(THEME_KEY, self.mode.as_str()) {
            tracing::warn!(%err, "failed to persist theme preference");
        }
    }

    fn broadcast(&self) {
        let mut event = Event::new(
            event_types::THEME_CHANGE,
            Region::Document,
            EventData::Theme {
                is_day: self.mode.is_day(),
            },
        );
        self.observers.dispatch(&mut event);
    }
}

/// Stored preference wins; any stored value other than `day` means night.
/// Without one, follow the system signal, defaulting to day.
fn load_mode<S: PreferenceStore>(store: &S, prefers_dark: Option<bool>) -> ThemeMode {
    let system = ThemeMode::from_prefers_dark(prefers_dark.unwrap_or(false));
    match store.get(THEME_KEY) {
        Ok(Some(saved)) if !saved.is_empty() => match saved.parse::<ThemeMode>() {
            Ok(mode) => mode,
            Err(err) => {
                tracing::debug!(%err, "unrecognized stored theme, using night");
                ThemeMode::Night
            }
        },
        Ok(_) => system,
        Err(err) => {
            tracing::warn!(%err, "theme preference unreadable, using system preference");
            system
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use folio_core::SilentAudio;

    #[derive(Default)]
    struct Surface {
        night: bool,
        particles: (f32, f32),
        icon: Option<ToggleIcon>,
        toggle: bool,
    }

    impl ThemeSurface for Surface {
        fn set_night_marker(&mut self, night: bool) {
            self.night = night;
        }

        fn set_particle_opacity(&mut self, day: f32, night: f32) {
            self.particles = (day, night);
        }

        fn has_toggle(&self) -> bool {
            self.toggle
        }

        fn set_toggle_icon(&mut self, icon: ToggleIcon) {
            self.icon = Some(icon);
        }
    }

    fn surface() -> Surface {
        Surface {
            toggle: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_stored_preference_beats_system() {
        let theme = ThemeState::new(
            MemoryStore::with_entry(THEME_KEY, "day"),
            SilentAudio,
            surface(),
            Some(true),
            FadeSettings::default(),
        );
        assert!(theme.is_day());
    }

    #[test]
    fn test_system_preference_used_without_stored_value() {
        let theme = ThemeState::new(
            MemoryStore::new(),
            SilentAudio,
            surface(),
            Some(true),
            FadeSettings::default(),
        );
        assert_eq!(theme.mode(), ThemeMode::Night);
        assert!(theme.surface().night);
        assert_eq!(theme.surface().icon, Some(ToggleIcon::Sun));
    }

    #[test]
    fn test_defaults_to_day() {
        let theme = ThemeState::new(
            MemoryStore::new(),
            SilentAudio,
            surface(),
            None,
            FadeSettings::default(),
        );
        assert_eq!(theme.mode(), ThemeMode::Day);
        assert_eq!(theme.surface().particles, (1.0, 0.0));
    }

    #[test]
    fn test_unknown_stored_value_means_night() {
        let theme = ThemeState::new(
            MemoryStore::with_entry(THEME_KEY, "dusk"),
            SilentAudio,
            surface(),
            Some(false),
            FadeSettings::default(),
        );
        assert_eq!(theme.mode(), ThemeMode::Night);
    }

    #[test]
    fn test_missing_toggle_skips_icon() {
        let mut theme = ThemeState::new(
            MemoryStore::new(),
            SilentAudio,
            Surface::default(),
            None,
            FadeSettings::default(),
        );
        theme.toggle();
        assert_eq!(theme.surface().icon, None);
        assert!(theme.surface().night);
    }
}
