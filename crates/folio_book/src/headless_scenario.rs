//! Scenario definition for headless book runs.

use anyhow::{Context, Result};
use folio_core::Region;
use folio_theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A surface setup plus the steps to run against it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surface: SurfaceSetup,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Shape of the in-memory surface and device
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SurfaceSetup {
    #[serde(default = "default_pages")]
    pub pages: usize,
    #[serde(default = "default_true")]
    pub indicators: bool,
    #[serde(default = "default_true")]
    pub menu: bool,
    #[serde(default = "default_true")]
    pub theme_toggle: bool,
    #[serde(default)]
    pub prefers_dark: Option<bool>,
    /// Value already in the preference store under `"theme"`
    #[serde(default)]
    pub stored_theme: Option<String>,
    #[serde(default = "default_true")]
    pub fine_pointer: bool,
}

fn default_pages() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for SurfaceSetup {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            indicators: true,
            menu: true,
            theme_toggle: true,
            prefers_dark: None,
            stored_theme: None,
            fine_pointer: true,
        }
    }
}

/// Named click targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Document,
    Book,
    PrevButton,
    NextButton,
    Dot(usize),
    MenuTrigger,
    MenuClose,
    MenuOverlay,
    MenuNav,
    MenuContact,
    MenuLink(usize),
    ThemeToggle,
}

impl From<Target> for Region {
    fn from(target: Target) -> Self {
        match target {
            Target::Document => Region::Document,
            Target::Book => Region::Book,
            Target::PrevButton => Region::PrevButton,
            Target::NextButton => Region::NextButton,
            Target::Dot(index) => Region::IndicatorDot(index),
            Target::MenuTrigger => Region::MenuTrigger,
            Target::MenuClose => Region::MenuClose,
            Target::MenuOverlay => Region::MenuOverlay,
            Target::MenuNav => Region::MenuNav,
            Target::MenuContact => Region::MenuContact,
            Target::MenuLink(index) => Region::MenuLink(index),
            Target::ThemeToggle => Region::ThemeToggle,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Click { target: Target },
    /// Key by name, e.g. `"ArrowRight"` or `"Escape"`
    Key { key: String },
    Swipe { from: f32, to: f32 },
    Wait { ms: u64 },
    ToggleTheme,
    Navigate { url: String },
    AssertPage { index: usize },
    AssertMenuOpen { open: bool },
    AssertTheme { mode: ThemeMode },
    AssertTransitioning { transitioning: bool },
}

impl ScenarioStep {
    /// Assertion name used in reports
    pub fn assertion_name(&self) -> Option<&'static str> {
        match self {
            ScenarioStep::AssertPage { .. } => Some("assert_page"),
            ScenarioStep::AssertMenuOpen { .. } => Some("assert_menu_open"),
            ScenarioStep::AssertTheme { .. } => Some("assert_theme"),
            ScenarioStep::AssertTransitioning { .. } => Some("assert_transitioning"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_step_kind() {
        let scenario = HeadlessScenario::from_json(
            r#"{
                "name": "tour",
                "surface": { "pages": 4, "prefers_dark": true },
                "steps": [
                    { "type": "click", "target": "next_button" },
                    { "type": "click", "target": { "dot": 2 } },
                    { "type": "key", "key": "ArrowLeft" },
                    { "type": "swipe", "from": 300, "to": 200 },
                    { "type": "wait", "ms": 1200 },
                    { "type": "toggle_theme" },
                    { "type": "navigate", "url": "/contact" },
                    { "type": "assert_page", "index": 1 },
                    { "type": "assert_menu_open", "open": false },
                    { "type": "assert_theme", "mode": "night" },
                    { "type": "assert_transitioning", "transitioning": false }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.surface.pages, 4);
        assert!(scenario.surface.menu);
        assert_eq!(scenario.steps.len(), 11);
        assert!(matches!(
            scenario.steps[1],
            ScenarioStep::Click {
                target: Target::Dot(2)
            }
        ));
        assert!(matches!(
            scenario.steps[9],
            ScenarioStep::AssertTheme {
                mode: ThemeMode::Night
            }
        ));
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(HeadlessScenario::from_json(r#"{ "steps": [{ "type": "dance" }] }"#).is_err());
    }
}
