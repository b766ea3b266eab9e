use leptos::*;

use super::{use_shell_runtime, windows_in_open_order, START_MENU_DOM_ID};
use crate::{
    model::WindowId,
    shell::{ShellAction, TASKBAR_HEIGHT},
};

fn taskbar_button_class(focused: bool, minimized: bool) -> &'static str {
    match (focused, minimized) {
        (_, true) => "taskbar-window minimized",
        (true, false) => "taskbar-window focused",
        (false, false) => "taskbar-window",
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_shell_runtime();
    let view_state = runtime.view;

    view! {
        <footer
            class="kiosk-taskbar"
            style=format!("height:{TASKBAR_HEIGHT}px;")
            role="toolbar"
            aria-label="Taskbar"
        >
            <button
                type="button"
                class="start-button"
                aria-haspopup="menu"
                aria-controls=START_MENU_DOM_ID
                aria-expanded=move || view_state.get().start_menu_open.to_string()
                on:click=move |_| runtime.dispatch_action(ShellAction::ToggleStartMenu)
            >
                {move || view_state.get().start_label}
            </button>
            <div class="taskbar-windows">
                <For
                    each=move || windows_in_open_order(&view_state.get())
                    key=|frame| frame.id.0
                    let:frame
                >
                    <TaskbarWindowButton window_id=frame.id title=frame.title icon=frame.icon />
                </For>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarWindowButton(window_id: WindowId, title: String, icon: String) -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = Signal::derive(move || {
        runtime
            .view
            .get()
            .windows
            .iter()
            .find(|frame| frame.id == window_id)
            .map(|frame| (frame.is_focused, frame.minimized))
            .unwrap_or_default()
    });

    view! {
        <button
            type="button"
            class=move || {
                let (focused, minimized) = state.get();
                taskbar_button_class(focused, minimized)
            }
            aria-pressed=move || state.get().0.to_string()
            title=title.clone()
            on:click=move |_| runtime.dispatch_action(ShellAction::ToggleTaskbarWindow(window_id))
        >
            <span aria-hidden="true">{icon}</span>
            <span class="taskbar-window-title">{title}</span>
        </button>
    }
}
