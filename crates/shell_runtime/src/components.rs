//! Kiosk shell UI composition: window area, start menu, and taskbar.

mod a11y;
mod menus;
mod taskbar;
mod window;

use leptos::*;

use self::{menus::StartMenu, taskbar::Taskbar, window::ShellWindow};
use crate::{
    host::is_document_fullscreen,
    model::WindowFrame,
    shell::{ShellAction, ShellView, ShortcutKey},
};

pub use crate::runtime_context::{use_shell_runtime, ShellProvider, ShellRuntimeContext};

const START_MENU_DOM_ID: &str = "ordo-start-menu";

/// Windows ordered by id. Stacking is expressed through z-index only, so DOM nodes never move
/// and embedded remote views are not reloaded on focus changes.
fn windows_in_open_order(view: &ShellView) -> Vec<WindowFrame> {
    let mut windows = view.windows.clone();
    windows.sort_by_key(|frame| frame.id);
    windows
}

#[component]
/// Renders the kiosk shell and routes global keyboard shortcuts to the controller.
pub fn KioskShell() -> impl IntoView {
    let runtime = use_shell_runtime();
    let view_state = runtime.view;

    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.repeat() {
            return;
        }
        let Some(key) = ShortcutKey::from_key(&ev.key(), ev.ctrl_key() || ev.meta_key()) else {
            return;
        };
        ev.prevent_default();
        runtime.handle_shortcut(key);
    });
    on_cleanup(move || shortcut_listener.remove());

    // Fullscreen requests without a user gesture are rejected, and the browser may leave
    // fullscreen on its own; both must reach the controller's toggle state.
    let sync_fullscreen = move |_: web_sys::Event| {
        runtime.dispatch_action(ShellAction::SyncFullscreen(is_document_fullscreen()));
    };
    let change_listener = window_event_listener_untyped("fullscreenchange", sync_fullscreen);
    let error_listener = window_event_listener_untyped("fullscreenerror", sync_fullscreen);
    on_cleanup(move || {
        change_listener.remove();
        error_listener.remove();
    });

    view! {
        <Show
            when=move || !view_state.get().shut_down
            fallback=|| {
                view! {
                    <div class="kiosk-shutdown" role="status">
                        "The session has ended."
                    </div>
                }
            }
        >
            <div id="ordo-shell-root" class="kiosk-shell" tabindex="-1">
                <main
                    class="kiosk-desktop"
                    on:mousedown=move |_| {
                        if view_state.get_untracked().start_menu_open {
                            runtime.dispatch_action(ShellAction::CloseStartMenu);
                        }
                    }
                >
                    <For
                        each=move || windows_in_open_order(&view_state.get())
                        key=|frame| frame.id.0
                        let:frame
                    >
                        <ShellWindow window_id=frame.id />
                    </For>
                </main>
                <StartMenu />
                <Taskbar />
            </div>
        </Show>
    }
}
