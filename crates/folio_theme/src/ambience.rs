//! Ambient sound mixer
//!
//! Two looping tracks, one per mode. Switching modes fades the outgoing track
//! down and pauses it while the incoming track starts silent and fades up.
//! Only the incoming track is ever rising. Nothing plays until the mixer has
//! been enabled by a user interaction.

use folio_animation::{FadeSettings, RampDirection, VolumeRamp};
use folio_core::{AudioPlayer, Sound};

use crate::mode::ThemeMode;

struct Track {
    sound: Sound,
    volume: f32,
    ramp: Option<VolumeRamp>,
}

impl Track {
    fn new(sound: Sound, volume: f32) -> Self {
        Self {
            sound,
            volume,
            ramp: None,
        }
    }
}

/// Cross-fading player for the day and night ambience
pub struct AmbientMixer<A: AudioPlayer> {
    audio: A,
    settings: FadeSettings,
    enabled: bool,
    day: Track,
    night: Track,
}

impl<A: AudioPlayer> AmbientMixer<A> {
    pub fn new(mut audio: A, settings: FadeSettings) -> Self {
        for sound in [Sound::DayAmbience, Sound::NightAmbience] {
            audio.set_volume(sound, settings.max_volume);
        }
        Self {
            audio,
            settings,
            enabled: false,
            day: Track::new(Sound::DayAmbience, settings.max_volume),
            night: Track::new(Sound::NightAmbience, settings.max_volume),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Allow playback and start the track for `mode`
    pub fn enable(&mut self, mode: ThemeMode) {
        self.enabled = true;
        self.apply(mode);
    }

    /// Stop playback and pause both tracks immediately
    pub fn disable(&mut self) {
        self.enabled = false;
        for track in [&mut self.day, &mut self.night] {
            track.ramp = None;
            self.audio.pause(track.sound);
        }
    }

    /// Cross-fade toward the track for `mode`; does nothing while disabled
    pub fn apply(&mut self, mode: ThemeMode) {
        if !self.enabled {
            return;
        }
        let (incoming, outgoing) = match mode {
            ThemeMode::Day => (&mut self.day, &mut self.night),
            ThemeMode::Night => (&mut self.night, &mut self.day),
        };

        outgoing.ramp = Some(VolumeRamp::fade_out(outgoing.volume, self.settings));

        incoming.volume = 0.0;
        self.audio.set_volume(incoming.sound, 0.0);
        if let Err(err) = self.audio.play(incoming.sound) {
            tracing::debug!(%err, "ambience playback refused, ignoring");
        }
        incoming.ramp = Some(VolumeRamp::fade_in(self.settings));
        tracing::debug!(?mode, "ambience cross-fade started");
    }

    /// Step any running fades
    pub fn advance(&mut self, dt_ms: u64) {
        for track in [&mut self.day, &mut self.night] {
            let Some(ramp) = track.ramp.as_mut() else {
                continue;
            };
            let audio = &mut self.audio;
            let sound = track.sound;
            let mut volume = track.volume;
            ramp.advance(dt_ms, |v| {
                volume = v;
                audio.set_volume(sound, v);
            });
            track.volume = volume;

            if ramp.is_finished() {
                if ramp.direction() == RampDirection::Out {
                    audio.pause(sound);
                }
                track.ramp = None;
            }
        }
    }

    /// Last volume assigned to a track
    pub fn volume(&self, sound: Sound) -> f32 {
        match sound {
            Sound::DayAmbience => self.day.volume,
            Sound::NightAmbience => self.night.volume,
            Sound::PageTurn => 0.0,
        }
    }

    /// The track currently fading in, if any
    pub fn rising_track(&self) -> Option<Sound> {
        [&self.day, &self.night]
            .into_iter()
            .find(|t| {
                t.ramp
                    .as_ref()
                    .is_some_and(|r| r.direction() == RampDirection::In)
            })
            .map(|t| t.sound)
    }

    /// Whether any fade is still running
    pub fn is_fading(&self) -> bool {
        self.day.ramp.is_some() || self.night.ramp.is_some()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::AudioError;

    #[derive(Default)]
    struct Recorder {
        playing: Vec<Sound>,
        refuse: bool,
    }

    impl AudioPlayer for Recorder {
        fn play(&mut self, sound: Sound) -> Result<(), AudioError> {
            if self.refuse {
                return Err(AudioError::Blocked(sound));
            }
            if !self.playing.contains(&sound) {
                self.playing.push(sound);
            }
            Ok(())
        }

        fn pause(&mut self, sound: Sound) {
            self.playing.retain(|s| *s != sound);
        }

        fn set_volume(&mut self, _sound: Sound, _volume: f32) {}
    }

    #[test]
    fn test_silent_until_enabled() {
        let mut mixer = AmbientMixer::new(Recorder::default(), FadeSettings::default());
        mixer.apply(ThemeMode::Day);
        mixer.advance(1_000);
        assert!(mixer.audio().playing.is_empty());
        assert_eq!(mixer.rising_track(), None);
    }

    #[test]
    fn test_enable_fades_in_current_mode() {
        let mut mixer = AmbientMixer::new(Recorder::default(), FadeSettings::default());
        mixer.enable(ThemeMode::Night);

        assert_eq!(mixer.rising_track(), Some(Sound::NightAmbience));
        assert_eq!(mixer.audio().playing, vec![Sound::NightAmbience]);

        mixer.advance(2_000);
        assert!(!mixer.is_fading());
        assert_eq!(mixer.volume(Sound::NightAmbience), 0.25);
        assert_eq!(mixer.volume(Sound::DayAmbience), 0.0);
    }

    #[test]
    fn test_disable_pauses_everything() {
        let mut mixer = AmbientMixer::new(Recorder::default(), FadeSettings::default());
        mixer.enable(ThemeMode::Day);
        mixer.advance(100);
        mixer.disable();
        assert!(mixer.audio().playing.is_empty());
        assert!(!mixer.is_fading());
    }

    #[test]
    fn test_refused_playback_is_not_fatal() {
        let recorder = Recorder {
            refuse: true,
            ..Default::default()
        };
        let mut mixer = AmbientMixer::new(recorder, FadeSettings::default());
        mixer.enable(ThemeMode::Day);
        mixer.advance(1_000);
        assert!(mixer.is_enabled());
        assert_eq!(mixer.volume(Sound::DayAmbience), 0.25);
    }
}
