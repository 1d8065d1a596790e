//! Theme mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Day or night
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl ThemeMode {
    /// Get the opposite mode
    pub fn toggle(&self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }

    pub fn is_day(&self) -> bool {
        matches!(self, ThemeMode::Day)
    }

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Day => "day",
            ThemeMode::Night => "night",
        }
    }

    /// Mode implied by the system dark-mode signal
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ThemeMode::Night
        } else {
            ThemeMode::Day
        }
    }

    /// Icon offered by the toggle: it shows the mode you would switch *to*
    pub fn toggle_icon(&self) -> ToggleIcon {
        match self {
            ThemeMode::Day => ToggleIcon::Moon,
            ThemeMode::Night => ToggleIcon::Sun,
        }
    }

    /// Opacity of the (day, night) particle layers
    pub fn particle_opacity(&self) -> (f32, f32) {
        match self {
            ThemeMode::Day => (1.0, 0.0),
            ThemeMode::Night => (0.0, 1.0),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme mode `{0}` (expected `day` or `night`)")]
pub struct ModeParseError(pub String);

impl FromStr for ThemeMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(ThemeMode::Day),
            "night" => Ok(ThemeMode::Night),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

/// Icon rendered inside the theme toggle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleIcon {
    Moon,
    Sun,
}
