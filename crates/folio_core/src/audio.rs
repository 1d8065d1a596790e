//! Audio collaborator
//!
//! Playback is fire-and-forget. Implementations report a refused start (for
//! example an autoplay policy) as an [`AudioError`]; callers decide whether to
//! ignore it.

use thiserror::Error;

/// Named sound assets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    /// One-shot cue played on every page turn
    PageTurn,
    /// Looping daytime ambience
    DayAmbience,
    /// Looping night-time ambience
    NightAmbience,
}

impl Sound {
    /// Asset path relative to the site root
    pub fn asset_path(&self) -> &'static str {
        match self {
            Sound::PageTurn => "assets/sounds/page-turn.mp3",
            Sound::DayAmbience => "assets/sounds/birds-day.mp3",
            Sound::NightAmbience => "assets/sounds/crickets-night.mp3",
        }
    }

    /// Whether the asset loops
    pub fn is_looping(&self) -> bool {
        !matches!(self, Sound::PageTurn)
    }
}

/// Why a playback request did not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The platform refused playback (autoplay policy, no user gesture yet)
    #[error("playback of {0:?} blocked by platform policy")]
    Blocked(Sound),

    /// The asset could not be loaded or decoded
    #[error("sound {sound:?} unavailable: {reason}")]
    Unavailable { sound: Sound, reason: String },
}

/// Fire-and-forget audio playback
pub trait AudioPlayer {
    /// Start (or resume) playback
    fn play(&mut self, sound: Sound) -> Result<(), AudioError>;

    /// Pause playback; pausing a silent sound is harmless
    fn pause(&mut self, sound: Sound);

    /// Set volume in `[0, 1]`
    fn set_volume(&mut self, sound: Sound, volume: f32);
}

/// Audio sink that accepts every request and produces nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self, _sound: Sound) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause(&mut self, _sound: Sound) {}

    fn set_volume(&mut self, _sound: Sound, _volume: f32) {}
}
