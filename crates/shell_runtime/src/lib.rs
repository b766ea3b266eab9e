//! Kiosk shell runtime: catalog loading, launch resolution, window hosting, and the Leptos UI.

pub mod apps;
pub mod catalog;
pub mod components;
mod effect_executor;
pub mod error;
pub mod host;
pub mod model;
pub mod resolver;
mod runtime_context;
pub mod shell;
pub mod window_manager;

pub use apps::{builtin_local_apps, builtin_resolver};
pub use catalog::{load_from_source, parse_catalog, AppRegistry, CatalogLoader};
pub use components::{use_shell_runtime, KioskShell, ShellProvider, ShellRuntimeContext};
pub use error::{CatalogIssue, OpenIgnored, ResolutionError, WindowError};
pub use model::*;
pub use resolver::{AppResolver, LocalAppRegistry, WindowContent};
pub use shell::{
    menu_rect, shortcut_action, MenuItem, ShellAction, ShellController, ShellEffect, ShellView,
    ShortcutKey,
};
pub use window_manager::{OpenOutcome, WindowHost};
