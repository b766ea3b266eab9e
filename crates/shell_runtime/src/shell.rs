//! Shell controller: start menu, taskbar state, keyboard shortcuts, and action dispatch.

use std::rc::Rc;

use leptos::logging;
use ordo_app_contract::AppServices;

use crate::{
    catalog::{AppRegistry, CatalogLoader},
    model::{ShellSettings, WindowFrame, WindowId, WindowRect},
    resolver::{AppResolver, WindowContent},
    window_manager::{OpenOutcome, WindowHost},
};

/// Start menu width in px.
pub const START_MENU_WIDTH: i32 = 300;
/// Start menu height in px, before clamping to the available space.
pub const START_MENU_HEIGHT: i32 = 400;
/// Taskbar height in px.
pub const TASKBAR_HEIGHT: i32 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`ShellController::dispatch`].
pub enum ShellAction {
    /// Open (or focus) the app with this catalog id.
    OpenApp(String),
    FocusWindow(WindowId),
    MinimizeWindow(WindowId),
    RestoreWindow(WindowId),
    CloseWindow(WindowId),
    /// Taskbar button click.
    ToggleTaskbarWindow(WindowId),
    ToggleStartMenu,
    CloseStartMenu,
    /// Activate the start menu item at this index.
    ActivateMenuItem(usize),
    ToggleFullscreen,
    /// The document entered or left fullscreen outside the shell's control.
    SyncFullscreen(bool),
    CloseActiveWindow,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents for the UI layer to execute.
pub enum ShellEffect {
    /// Move keyboard focus into the window's content.
    FocusWindowInput(WindowId),
    /// Enter or leave fullscreen presentation.
    SetFullscreen(bool),
    /// Tear the session down.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the start menu.
pub enum MenuItem {
    App {
        app_id: String,
        title: String,
        icon: String,
    },
    Shutdown {
        label: String,
    },
}

impl MenuItem {
    pub fn label(&self) -> &str {
        match self {
            Self::App { title, .. } => title,
            Self::Shutdown { label } => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Keyboard shortcuts understood by the shell.
pub enum ShortcutKey {
    /// `Alt` pressed on its own.
    Alt,
    Escape,
    /// `Ctrl+W`.
    CloseWindow,
}

impl ShortcutKey {
    /// Maps a DOM `KeyboardEvent.key` value plus modifier state to a shortcut.
    pub fn from_key(key: &str, ctrl: bool) -> Option<Self> {
        match key {
            "Alt" => Some(Self::Alt),
            "Escape" => Some(Self::Escape),
            "w" | "W" if ctrl => Some(Self::CloseWindow),
            _ => None,
        }
    }
}

/// Action bound to a shortcut. `Escape` closing an open start menu first is handled by
/// [`ShellController::handle_shortcut`].
pub fn shortcut_action(key: ShortcutKey) -> Option<ShellAction> {
    match key {
        ShortcutKey::Alt => Some(ShellAction::ToggleStartMenu),
        ShortcutKey::Escape => Some(ShellAction::ToggleFullscreen),
        ShortcutKey::CloseWindow => Some(ShellAction::CloseActiveWindow),
    }
}

/// Start menu rectangle: left edge, directly above the taskbar, clamped to the free height.
pub fn menu_rect(viewport: WindowRect, taskbar_height: i32) -> WindowRect {
    let available = (viewport.h - taskbar_height).max(0);
    let h = START_MENU_HEIGHT.min(available);
    WindowRect {
        x: viewport.x,
        y: viewport.y + available - h,
        w: START_MENU_WIDTH.min(viewport.w.max(0)),
        h,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Plain-data snapshot of everything the UI renders.
pub struct ShellView {
    pub windows: Vec<WindowFrame>,
    pub active_window: Option<WindowId>,
    pub menu_items: Vec<MenuItem>,
    pub start_menu_open: bool,
    pub fullscreen: bool,
    pub start_label: String,
    pub shut_down: bool,
}

/// Owns the registry, the resolver, and the window host, and applies [`ShellAction`]s.
#[derive(Debug)]
pub struct ShellController {
    loader: CatalogLoader,
    registry: Rc<AppRegistry>,
    resolver: AppResolver,
    services: AppServices,
    windows: WindowHost,
    menu_items: Vec<MenuItem>,
    start_menu_open: bool,
    fullscreen: bool,
    shut_down: bool,
}

impl ShellController {
    /// Loads the catalog, validates it against the resolver, and builds the start menu.
    pub fn new(loader: CatalogLoader, resolver: AppResolver, services: AppServices) -> Self {
        let registry = loader.load_registry();
        for problem in resolver.validate(&registry) {
            logging::warn!("catalog entry cannot be opened: {problem}");
        }
        let settings = registry.settings().clone();
        let menu_items = build_menu(&registry, &settings);

        Self {
            loader,
            windows: WindowHost::new(settings.dedup),
            registry,
            resolver,
            services,
            menu_items,
            start_menu_open: false,
            fullscreen: settings.fullscreen,
            shut_down: false,
        }
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    pub fn settings(&self) -> &ShellSettings {
        self.registry.settings()
    }

    pub fn windows(&self) -> &WindowHost {
        &self.windows
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn is_start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn content(&self, window_id: WindowId) -> Option<&WindowContent> {
        self.windows.content(window_id)
    }

    pub fn services(&self) -> &AppServices {
        &self.services
    }

    /// Effects to run once the UI is mounted.
    pub fn boot_effects(&self) -> Vec<ShellEffect> {
        vec![ShellEffect::SetFullscreen(self.fullscreen)]
    }

    pub fn view_state(&self) -> ShellView {
        ShellView {
            windows: self.windows.frames(),
            active_window: self.windows.active_window(),
            menu_items: self.menu_items.clone(),
            start_menu_open: self.start_menu_open,
            fullscreen: self.fullscreen,
            start_label: self.settings().start_label.clone(),
            shut_down: self.shut_down,
        }
    }

    /// Applies a shortcut, closing an open start menu on `Escape` before anything else.
    pub fn handle_shortcut(&mut self, key: ShortcutKey) -> Vec<ShellEffect> {
        if key == ShortcutKey::Escape && self.start_menu_open {
            return self.dispatch(ShellAction::CloseStartMenu);
        }
        shortcut_action(key)
            .map(|action| self.dispatch(action))
            .unwrap_or_default()
    }

    /// Applies one action. Failures are logged and leave the state unchanged.
    pub fn dispatch(&mut self, action: ShellAction) -> Vec<ShellEffect> {
        if self.shut_down {
            logging::warn!("shell is shut down; ignoring {action:?}");
            return Vec::new();
        }

        match action {
            ShellAction::OpenApp(app_id) => self.open_app(&app_id),
            ShellAction::FocusWindow(window_id) | ShellAction::RestoreWindow(window_id) => {
                let result = self.windows.focus(window_id);
                self.after_window_change(result)
            }
            ShellAction::MinimizeWindow(window_id) => {
                let result = self.windows.minimize(window_id);
                self.after_window_change(result)
            }
            ShellAction::CloseWindow(window_id) => {
                let result = self.windows.close(window_id);
                self.after_window_change(result)
            }
            ShellAction::ToggleTaskbarWindow(window_id) => {
                let result = self.windows.toggle_taskbar_window(window_id);
                self.after_window_change(result)
            }
            ShellAction::ToggleStartMenu => {
                self.start_menu_open = !self.start_menu_open;
                Vec::new()
            }
            ShellAction::CloseStartMenu => {
                self.start_menu_open = false;
                Vec::new()
            }
            ShellAction::ActivateMenuItem(index) => match self.menu_items.get(index).cloned() {
                Some(MenuItem::App { app_id, .. }) => self.open_app(&app_id),
                Some(MenuItem::Shutdown { .. }) => self.shutdown(),
                None => {
                    logging::warn!("start menu item {index} does not exist");
                    Vec::new()
                }
            },
            ShellAction::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                vec![ShellEffect::SetFullscreen(self.fullscreen)]
            }
            ShellAction::SyncFullscreen(active) => {
                self.fullscreen = active;
                Vec::new()
            }
            ShellAction::CloseActiveWindow => match self.windows.active_window() {
                Some(window_id) => {
                    let result = self.windows.close(window_id);
                    self.after_window_change(result)
                }
                None => Vec::new(),
            },
            ShellAction::Shutdown => self.shutdown(),
        }
    }

    fn open_app(&mut self, app_id: &str) -> Vec<ShellEffect> {
        self.start_menu_open = false;
        let outcome = self
            .windows
            .open(&self.registry, &self.resolver, &self.services, app_id);
        outcome
            .window_id()
            .map(ShellEffect::FocusWindowInput)
            .into_iter()
            .collect()
    }

    fn after_window_change(
        &mut self,
        result: Result<(), crate::error::WindowError>,
    ) -> Vec<ShellEffect> {
        if let Err(err) = result {
            logging::warn!("window action ignored: {err}");
            return Vec::new();
        }
        self.windows
            .active_window()
            .map(ShellEffect::FocusWindowInput)
            .into_iter()
            .collect()
    }

    fn shutdown(&mut self) -> Vec<ShellEffect> {
        logging::log!("shutting down with {} open window(s)", self.windows.len());
        self.start_menu_open = false;
        self.shut_down = true;
        let mut effects = Vec::new();
        if self.fullscreen {
            self.fullscreen = false;
            effects.push(ShellEffect::SetFullscreen(false));
        }
        effects.push(ShellEffect::Shutdown);
        effects
    }
}

fn build_menu(registry: &AppRegistry, settings: &ShellSettings) -> Vec<MenuItem> {
    let mut apps: Vec<_> = registry.iter().collect();
    apps.sort_by_key(|entry| entry.title.to_lowercase());
    apps.into_iter()
        .map(|entry| MenuItem::App {
            app_id: entry.id.clone(),
            title: entry.title.clone(),
            icon: entry.icon.clone(),
        })
        .chain(std::iter::once(MenuItem::Shutdown {
            label: settings.shutdown_label.clone(),
        }))
        .collect()
}
