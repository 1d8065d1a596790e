//! Integration tests for theme toggling, ambience cross-fades and notifications

use folio_animation::FadeSettings;
use folio_core::{AudioError, AudioPlayer, EventData, Sound};
use folio_theme::{MemoryStore, ThemeMode, ThemeState, ThemeSurface, ToggleIcon, THEME_KEY};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum AudioCall {
    Play(Sound),
    Pause(Sound),
    Volume(Sound, f32),
}

/// Audio double that records every call into a shared log
#[derive(Clone, Default)]
struct RecordingAudio {
    log: Rc<RefCell<Vec<AudioCall>>>,
}

impl RecordingAudio {
    fn volumes(&self, sound: Sound) -> Vec<f32> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                AudioCall::Volume(s, v) if *s == sound => Some(*v),
                _ => None,
            })
            .collect()
    }

    fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn calls(&self) -> Vec<AudioCall> {
        self.log.borrow().clone()
    }
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, sound: Sound) -> Result<(), AudioError> {
        self.log.borrow_mut().push(AudioCall::Play(sound));
        Ok(())
    }

    fn pause(&mut self, sound: Sound) {
        self.log.borrow_mut().push(AudioCall::Pause(sound));
    }

    fn set_volume(&mut self, sound: Sound, volume: f32) {
        self.log.borrow_mut().push(AudioCall::Volume(sound, volume));
    }
}

#[derive(Default)]
struct NullSurface {
    icon: Option<ToggleIcon>,
}

impl ThemeSurface for NullSurface {
    fn set_night_marker(&mut self, _night: bool) {}

    fn set_particle_opacity(&mut self, _day: f32, _night: f32) {}

    fn has_toggle(&self) -> bool {
        true
    }

    fn set_toggle_icon(&mut self, icon: ToggleIcon) {
        self.icon = Some(icon);
    }
}

fn theme_with(
    store: MemoryStore,
    audio: RecordingAudio,
) -> ThemeState<MemoryStore, RecordingAudio, NullSurface> {
    ThemeState::new(
        store,
        audio,
        NullSurface::default(),
        None,
        FadeSettings::default(),
    )
}

#[test]
fn day_to_night_cross_fade_is_monotonic() {
    let audio = RecordingAudio::default();
    let mut theme = theme_with(MemoryStore::new(), audio.clone());

    theme.notify_user_interaction();
    for _ in 0..40 {
        theme.advance(50);
    }
    assert_eq!(theme.mixer().volume(Sound::DayAmbience), 0.25);

    audio.clear();
    theme.toggle();
    assert_eq!(theme.mixer().rising_track(), Some(Sound::NightAmbience));

    for _ in 0..40 {
        theme.advance(50);
        assert_ne!(theme.mixer().rising_track(), Some(Sound::DayAmbience));
    }

    let day = audio.volumes(Sound::DayAmbience);
    assert!(day.windows(2).all(|w| w[1] < w[0]), "day volumes: {day:?}");
    assert_eq!(day.last().copied(), Some(0.0));

    // Night starts silent, then rises step by step.
    let night = audio.volumes(Sound::NightAmbience);
    assert_eq!(night.first().copied(), Some(0.0));
    assert!(night.windows(2).all(|w| w[1] > w[0]), "night volumes: {night:?}");
    assert_eq!(night.last().copied(), Some(0.25));

    let calls = audio.calls();
    assert!(calls.contains(&AudioCall::Play(Sound::NightAmbience)));
    assert!(calls.contains(&AudioCall::Pause(Sound::DayAmbience)));
    assert!(!calls.contains(&AudioCall::Play(Sound::DayAmbience)));
    assert!(!theme.mixer().is_fading());
}

#[test]
fn no_audio_before_first_interaction() {
    let audio = RecordingAudio::default();
    let mut theme = theme_with(MemoryStore::new(), audio.clone());
    audio.clear();

    theme.toggle();
    theme.advance(2_000);
    assert!(audio
        .calls()
        .iter()
        .all(|c| !matches!(c, AudioCall::Play(_))));
    assert!(!theme.sound_enabled());

    theme.notify_user_interaction();
    assert!(theme.sound_enabled());
    assert!(audio.calls().contains(&AudioCall::Play(Sound::NightAmbience)));
}

#[test]
fn interaction_gate_fires_once() {
    let mut theme = theme_with(MemoryStore::new(), RecordingAudio::default());
    theme.notify_user_interaction();
    theme.toggle_sound();
    assert!(!theme.sound_enabled());

    theme.notify_user_interaction();
    assert!(!theme.sound_enabled());

    theme.toggle_sound();
    assert!(theme.sound_enabled());
}

#[test]
fn toggle_sound_off_pauses_both_tracks() {
    let audio = RecordingAudio::default();
    let mut theme = theme_with(MemoryStore::new(), audio.clone());
    theme.notify_user_interaction();
    theme.advance(200);
    audio.clear();

    theme.toggle_sound();
    let calls = audio.calls();
    assert!(calls.contains(&AudioCall::Pause(Sound::DayAmbience)));
    assert!(calls.contains(&AudioCall::Pause(Sound::NightAmbience)));
    assert!(!theme.mixer().is_fading());
}

#[test]
fn double_toggle_restores_mode_and_preference() {
    let mut theme = theme_with(
        MemoryStore::with_entry(THEME_KEY, "night"),
        RecordingAudio::default(),
    );
    assert_eq!(theme.mode(), ThemeMode::Night);

    theme.toggle();
    assert_eq!(theme.store().peek(THEME_KEY), Some("day"));
    assert_eq!(theme.surface().icon, Some(ToggleIcon::Moon));

    theme.toggle();
    assert_eq!(theme.mode(), ThemeMode::Night);
    assert_eq!(theme.store().peek(THEME_KEY), Some("night"));
    assert_eq!(theme.surface().icon, Some(ToggleIcon::Sun));
}

#[test]
fn observers_receive_new_mode() {
    let mut theme = theme_with(MemoryStore::new(), RecordingAudio::default());
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = seen.clone();
    let id = theme.subscribe(move |event| {
        if let EventData::Theme { is_day } = event.data {
            sink.borrow_mut().push(is_day);
        }
    });

    theme.toggle();
    theme.toggle();
    assert_eq!(*seen.borrow(), vec![false, true]);

    assert!(theme.unsubscribe(id));
    theme.toggle();
    assert_eq!(seen.borrow().len(), 2);
}
