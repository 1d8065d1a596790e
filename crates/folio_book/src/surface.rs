//! In-memory book surface
//!
//! A shared, cloneable model of everything the components render: spreads,
//! indicators, buttons, labels, sweep overlays, theme markers, the menu and
//! the drawn cursor. The headless runner and the tests drive the book
//! against it.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use folio_animation::SweepFrame;
use folio_theme::{ThemeSurface, ToggleIcon};

use crate::cursor::{CursorFrame, CursorSurface};
use crate::menu::MenuSurface;
use crate::view::{NavButton, ViewRegistry};

/// Everything a [`MemorySurface`] currently shows
#[derive(Clone, Debug, Default)]
pub struct SurfaceModel {
    pub pages: Vec<bool>,
    /// `None` when the indicator container is not rendered
    pub indicators: Option<Vec<bool>>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub page_numbers: (u32, u32),
    /// Mounted sweep overlays keyed by z-index
    pub sweeps: BTreeMap<u32, SweepFrame>,
    pub night_marker: bool,
    pub particle_opacity: (f32, f32),
    pub toggle_icon: Option<ToggleIcon>,
    pub has_toggle: bool,
    pub has_menu: bool,
    pub menu_open: bool,
    pub scroll_locked: bool,
    pub cursor: Option<CursorFrame>,
}

impl SurfaceModel {
    /// Index of the spread currently marked active
    pub fn active_page(&self) -> Option<usize> {
        self.pages.iter().position(|active| *active)
    }

    pub fn active_indicator(&self) -> Option<usize> {
        self.indicators.as_ref()?.iter().position(|active| *active)
    }
}

/// Cloneable handle onto a shared [`SurfaceModel`]
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    model: Rc<RefCell<SurfaceModel>>,
}

impl MemorySurface {
    /// A full surface with `pages` spreads
    pub fn new(pages: usize) -> Self {
        let model = SurfaceModel {
            pages: vec![false; pages],
            indicators: Some(Vec::new()),
            has_toggle: true,
            has_menu: true,
            ..Default::default()
        };
        Self {
            model: Rc::new(RefCell::new(model)),
        }
    }

    pub fn without_indicators(self) -> Self {
        self.model.borrow_mut().indicators = None;
        self
    }

    pub fn without_menu(self) -> Self {
        self.model.borrow_mut().has_menu = false;
        self
    }

    pub fn without_toggle(self) -> Self {
        self.model.borrow_mut().has_toggle = false;
        self
    }

    pub fn model(&self) -> Ref<'_, SurfaceModel> {
        self.model.borrow()
    }

    pub fn snapshot(&self) -> SurfaceModel {
        self.model.borrow().clone()
    }
}

impl ViewRegistry for MemorySurface {
    fn page_count(&self) -> usize {
        self.model.borrow().pages.len()
    }

    fn has_indicators(&self) -> bool {
        self.model.borrow().indicators.is_some()
    }

    fn render_indicators(&mut self, count: usize) {
        if let Some(dots) = self.model.borrow_mut().indicators.as_mut() {
            *dots = vec![false; count];
        }
    }

    fn set_active_page(&mut self, index: usize, active: bool) {
        if let Some(page) = self.model.borrow_mut().pages.get_mut(index) {
            *page = active;
        }
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        let mut model = self.model.borrow_mut();
        if let Some(dot) = model.indicators.as_mut().and_then(|d| d.get_mut(index)) {
            *dot = active;
        }
    }

    fn set_button_enabled(&mut self, button: NavButton, enabled: bool) {
        let mut model = self.model.borrow_mut();
        match button {
            NavButton::Prev => model.prev_enabled = enabled,
            NavButton::Next => model.next_enabled = enabled,
        }
    }

    fn set_page_numbers(&mut self, left: u32, right: u32) {
        self.model.borrow_mut().page_numbers = (left, right);
    }

    fn show_sweep(&mut self, frame: &SweepFrame) {
        self.model.borrow_mut().sweeps.insert(frame.z_index, *frame);
    }

    fn remove_sweep(&mut self, z_index: u32) {
        self.model.borrow_mut().sweeps.remove(&z_index);
    }
}

impl ThemeSurface for MemorySurface {
    fn set_night_marker(&mut self, night: bool) {
        self.model.borrow_mut().night_marker = night;
    }

    fn set_particle_opacity(&mut self, day: f32, night: f32) {
        self.model.borrow_mut().particle_opacity = (day, night);
    }

    fn has_toggle(&self) -> bool {
        self.model.borrow().has_toggle
    }

    fn set_toggle_icon(&mut self, icon: ToggleIcon) {
        self.model.borrow_mut().toggle_icon = Some(icon);
    }
}

impl MenuSurface for MemorySurface {
    fn has_menu(&self) -> bool {
        self.model.borrow().has_menu
    }

    fn set_menu_open(&mut self, open: bool) {
        self.model.borrow_mut().menu_open = open;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.model.borrow_mut().scroll_locked = locked;
    }
}

impl CursorSurface for MemorySurface {
    fn render_cursor(&mut self, frame: &CursorFrame) {
        self.model.borrow_mut().cursor = Some(frame.clone());
    }
}
