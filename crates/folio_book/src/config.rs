//! Folio configuration file handling (folio.toml)

use std::fs;
use std::io;
use std::path::Path;

use folio_animation::FadeSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::SWIPE_THRESHOLD;
use crate::menu::LINK_CLOSE_DELAY_MS;
use crate::sequencer::PAGE_TURN_VOLUME;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub ambience: AmbienceConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NavigationConfig {
    /// Minimum swipe travel in pixels
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,
    #[serde(default = "default_page_turn_volume")]
    pub page_turn_volume: f32,
}

fn default_swipe_threshold() -> f32 {
    SWIPE_THRESHOLD
}

fn default_page_turn_volume() -> f32 {
    PAGE_TURN_VOLUME
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            page_turn_volume: default_page_turn_volume(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AmbienceConfig {
    #[serde(default = "default_fade_step")]
    pub fade_step: f32,
    #[serde(default = "default_fade_interval")]
    pub fade_interval_ms: u64,
    #[serde(default = "default_max_volume")]
    pub max_volume: f32,
}

fn default_fade_step() -> f32 {
    FadeSettings::default().step
}

fn default_fade_interval() -> u64 {
    FadeSettings::default().interval_ms
}

fn default_max_volume() -> f32 {
    FadeSettings::default().max_volume
}

impl Default for AmbienceConfig {
    fn default() -> Self {
        Self {
            fade_step: default_fade_step(),
            fade_interval_ms: default_fade_interval(),
            max_volume: default_max_volume(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MenuConfig {
    #[serde(default = "default_link_close_delay")]
    pub link_close_delay_ms: u64,
}

fn default_link_close_delay() -> u64 {
    LINK_CLOSE_DELAY_MS
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            link_close_delay_ms: default_link_close_delay(),
        }
    }
}

impl FolioConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let nav = &self.navigation;
        if nav.swipe_threshold.is_nan() || nav.swipe_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "navigation.swipe_threshold must be non-negative, got {}",
                nav.swipe_threshold
            )));
        }
        check_volume("navigation.page_turn_volume", nav.page_turn_volume)?;

        let amb = &self.ambience;
        check_volume("ambience.max_volume", amb.max_volume)?;
        if amb.fade_step.is_nan() || amb.fade_step <= 0.0 || amb.fade_step > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "ambience.fade_step must be in (0, 1], got {}",
                amb.fade_step
            )));
        }
        if amb.fade_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "ambience.fade_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fade_settings(&self) -> FadeSettings {
        FadeSettings {
            step: self.ambience.fade_step,
            interval_ms: self.ambience.fade_interval_ms,
            max_volume: self.ambience.max_volume,
        }
    }
}

fn check_volume(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
