//! Composition root
//!
//! [`Folio`] wires the page sequencer, input router, menu, theme, cursor and
//! link transitions onto one surface. Surface events go in through
//! [`Folio::handle_event`]; time goes in through [`Folio::advance`] or
//! [`Folio::tick`].

use folio_core::events::event_types;
use folio_core::{AudioPlayer, Clock, Event, FrameClock, Region};
use folio_theme::{PreferenceStore, ThemeMode, ThemeState, ThemeSurface};

use crate::config::FolioConfig;
use crate::cursor::{CursorState, CursorSurface, PointerCapabilities};
use crate::input::InputRouter;
use crate::link::{LinkTransition, Navigator};
use crate::menu::{MenuOverlay, MenuSurface};
use crate::sequencer::PageSequencer;
use crate::view::ViewRegistry;

/// A surface that can host every component
pub trait BookSurface:
    ViewRegistry + ThemeSurface + MenuSurface + CursorSurface + Clone + 'static
{
}

impl<T> BookSurface for T where
    T: ViewRegistry + ThemeSurface + MenuSurface + CursorSurface + Clone + 'static
{
}

/// What the platform reports about the user's device
#[derive(Clone, Copy, Debug, Default)]
pub struct Environment {
    /// System dark-mode signal, `None` when unknown
    pub prefers_dark: Option<bool>,
    pub pointer: PointerCapabilities,
}

/// The assembled book
pub struct Folio<S, A, P, N>
where
    S: BookSurface,
    A: AudioPlayer + Clone + 'static,
    P: PreferenceStore,
    N: Navigator + 'static,
{
    surface: S,
    pages: Option<PageSequencer<S, A>>,
    router: InputRouter,
    menu: Option<MenuOverlay<S>>,
    theme: ThemeState<P, A, S>,
    cursor: Option<CursorState>,
    links: LinkTransition<N>,
}

impl<S, A, P, N> Folio<S, A, P, N>
where
    S: BookSurface,
    A: AudioPlayer + Clone + 'static,
    P: PreferenceStore,
    N: Navigator + 'static,
{
    /// Mount every component. Missing regions disable the component that
    /// needs them and are logged; they never fail construction.
    pub fn new(
        config: &FolioConfig,
        surface: S,
        audio: A,
        store: P,
        navigator: N,
        env: Environment,
    ) -> Self {
        let pages = match PageSequencer::mount(
            surface.clone(),
            audio.clone(),
            config.navigation.page_turn_volume,
        ) {
            Ok(pages) => Some(pages),
            Err(err) => {
                tracing::warn!(%err, "page navigation disabled");
                None
            }
        };

        let menu = match MenuOverlay::attach(surface.clone(), config.menu.link_close_delay_ms) {
            Ok(menu) => Some(menu),
            Err(err) => {
                tracing::warn!(%err, "menu disabled");
                None
            }
        };

        let theme = ThemeState::new(
            store,
            audio,
            surface.clone(),
            env.prefers_dark,
            config.fade_settings(),
        );

        tracing::info!(
            pages = pages.as_ref().map_or(0, |p| p.total_pages()),
            menu = menu.is_some(),
            mode = %theme.mode(),
            "folio mounted"
        );

        Self {
            surface,
            pages,
            router: InputRouter::new(config.navigation.swipe_threshold),
            menu,
            theme,
            cursor: CursorState::for_pointer(env.pointer),
            links: LinkTransition::new(navigator),
        }
    }

    /// Deliver one surface event to every interested component
    pub fn handle_event(&mut self, event: &Event) {
        if event.event_type == event_types::CLICK {
            if event.target == Region::ThemeToggle {
                self.theme.toggle();
            }
            self.theme.notify_user_interaction();
        }

        if let Some(menu) = self.menu.as_mut() {
            menu.handle_event(event);
        }

        if let Some(pages) = self.pages.as_mut() {
            if let Some(command) = self.router.route(event, pages.is_transitioning()) {
                let accepted = pages.execute(command);
                tracing::debug!(?command, accepted, "navigation command");
            }
        }

        if let Some(cursor) = self.cursor.as_mut() {
            cursor.handle_event(event);
        }
    }

    /// Advance every timed component by `dt_ms`
    pub fn advance(&mut self, dt_ms: u64) {
        if let Some(pages) = self.pages.as_mut() {
            pages.advance(dt_ms);
        }
        if let Some(menu) = self.menu.as_mut() {
            menu.advance(dt_ms);
        }
        self.theme.advance(dt_ms);

        if let Some(frame) = self.links.advance(dt_ms) {
            self.surface.show_sweep(&frame);
        }
        if let Some(cursor) = self.cursor.as_ref() {
            self.surface.render_cursor(&cursor.frame());
        }
    }

    /// Advance by the time elapsed since the previous frame
    pub fn tick<C: Clock>(&mut self, frames: &mut FrameClock<C>) -> u64 {
        let dt = frames.tick();
        self.advance(dt);
        dt
    }

    /// Cover the surface and leave for `url`
    pub fn navigate(&mut self, url: &str) -> bool {
        if !self.links.navigate(url) {
            return false;
        }
        if let Some(frame) = self.links.frame() {
            self.surface.show_sweep(&frame);
        }
        true
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        self.pages.as_mut().is_some_and(|p| p.go_to_page(index))
    }

    pub fn next_page(&mut self) -> bool {
        self.pages.as_mut().is_some_and(|p| p.next_page())
    }

    pub fn prev_page(&mut self) -> bool {
        self.pages.as_mut().is_some_and(|p| p.prev_page())
    }

    pub fn current_page(&self) -> Option<usize> {
        self.pages.as_ref().map(|p| p.current_page())
    }

    pub fn total_pages(&self) -> usize {
        self.pages.as_ref().map_or(0, |p| p.total_pages())
    }

    pub fn is_transitioning(&self) -> bool {
        self.pages.as_ref().is_some_and(|p| p.is_transitioning())
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(|m| m.is_open())
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn theme(&self) -> &ThemeState<P, A, S> {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeState<P, A, S> {
        &mut self.theme
    }

    pub fn cursor_mut(&mut self) -> Option<&mut CursorState> {
        self.cursor.as_mut()
    }

    pub fn navigator(&self) -> &N {
        self.links.navigator()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
