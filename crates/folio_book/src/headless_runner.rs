//! Scenario runner that drives a [`Folio`] against an in-memory surface.

use anyhow::{bail, Result};
use folio_core::{Clock, Event, FrameClock, KeyCode, ManualClock, Region, SilentAudio};
use folio_theme::{MemoryStore, THEME_KEY};

use crate::config::FolioConfig;
use crate::cursor::PointerCapabilities;
use crate::folio::{Environment, Folio};
use crate::headless_report::{FinalState, HeadlessReport};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep, SurfaceSetup};
use crate::link::RecordingNavigator;
use crate::surface::MemorySurface;

/// Folio assembled from in-memory collaborators
pub type HeadlessFolio = Folio<MemorySurface, SilentAudio, MemoryStore, RecordingNavigator>;

/// Runner settings
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Frame length used to split `wait` steps
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self { tick_ms: 16 }
    }
}

/// Build a folio for the given surface description
pub fn build_folio(setup: &SurfaceSetup, config: &FolioConfig) -> HeadlessFolio {
    let mut surface = MemorySurface::new(setup.pages);
    if !setup.indicators {
        surface = surface.without_indicators();
    }
    if !setup.menu {
        surface = surface.without_menu();
    }
    if !setup.theme_toggle {
        surface = surface.without_toggle();
    }

    let store = match setup.stored_theme.as_deref() {
        Some(value) => MemoryStore::with_entry(THEME_KEY, value),
        None => MemoryStore::new(),
    };
    let env = Environment {
        prefers_dark: setup.prefers_dark,
        pointer: if setup.fine_pointer {
            PointerCapabilities::FINE
        } else {
            PointerCapabilities::TOUCH
        },
    };

    Folio::new(
        config,
        surface,
        SilentAudio,
        store,
        RecordingNavigator::new(),
        env,
    )
}

/// Execute scenario JSON with default settings.
pub fn run_scenario(input: &str) -> Result<HeadlessReport> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, &FolioConfig::default(), HeadlessRunConfig::default())
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    config: &FolioConfig,
    runtime_cfg: HeadlessRunConfig,
) -> Result<HeadlessReport> {
    if runtime_cfg.tick_ms == 0 {
        bail!("tick_ms must be positive");
    }
    config.validate()?;

    let mut folio = build_folio(&scenario.surface, config);
    let clock = ManualClock::new();
    let mut frames = FrameClock::new(clock.clone());

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, ?step, "scenario step");
        match step {
            ScenarioStep::Click { target } => {
                folio.handle_event(&Event::click(Region::from(*target)));
            }
            ScenarioStep::Key { key } => {
                let code = KeyCode::from_key_name(key);
                if code == KeyCode::UNKNOWN {
                    tracing::debug!(key = %key, "unmapped key name");
                }
                folio.handle_event(&Event::key_down(code));
            }
            ScenarioStep::Swipe { from, to } => {
                folio.handle_event(&Event::touch_start(Region::Book, *from));
                folio.handle_event(&Event::touch_end(Region::Book, *to));
            }
            ScenarioStep::Wait { ms } => {
                let mut remaining = *ms;
                while remaining > 0 {
                    let step_ms = remaining.min(runtime_cfg.tick_ms);
                    clock.advance(step_ms);
                    folio.tick(&mut frames);
                    remaining -= step_ms;
                }
            }
            ScenarioStep::ToggleTheme => folio.theme_mut().toggle(),
            ScenarioStep::Navigate { url } => {
                folio.navigate(url);
            }
            assertion => {
                if let Some(message) = check(assertion, &folio) {
                    let name = assertion.assertion_name().unwrap_or("assert");
                    return Ok(HeadlessReport::failed(
                        scenario.name.clone(),
                        name,
                        step_index,
                        message,
                        clock.now_ms(),
                        final_state(&folio),
                    ));
                }
            }
        }
    }

    Ok(HeadlessReport::passed(
        scenario.name.clone(),
        clock.now_ms(),
        final_state(&folio),
    ))
}

/// Evaluate an assertion step; `Some(message)` on failure
fn check(step: &ScenarioStep, folio: &HeadlessFolio) -> Option<String> {
    match step {
        ScenarioStep::AssertPage { index } => match folio.current_page() {
            Some(page) if page == *index => None,
            Some(page) => Some(format!("expected page {index}, got {page}")),
            None => Some(format!("expected page {index}, navigation is disabled")),
        },
        ScenarioStep::AssertMenuOpen { open } => {
            let actual = folio.menu_open();
            (actual != *open).then(|| format!("expected menu open = {open}, got {actual}"))
        }
        ScenarioStep::AssertTheme { mode } => {
            let actual = folio.theme_mode();
            (actual != *mode).then(|| format!("expected theme {mode}, got {actual}"))
        }
        ScenarioStep::AssertTransitioning { transitioning } => {
            let actual = folio.is_transitioning();
            (actual != *transitioning)
                .then(|| format!("expected transitioning = {transitioning}, got {actual}"))
        }
        _ => None,
    }
}

fn final_state(folio: &HeadlessFolio) -> FinalState {
    FinalState {
        page: folio.current_page(),
        total_pages: folio.total_pages(),
        transitioning: folio.is_transitioning(),
        menu_open: folio.menu_open(),
        theme: folio.theme_mode(),
        sound_enabled: folio.theme().sound_enabled(),
        page_numbers: folio.surface().model().page_numbers,
        navigated: folio.navigator().visited(),
    }
}
