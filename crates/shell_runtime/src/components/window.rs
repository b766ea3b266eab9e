use leptos::*;
use ordo_app_contract::AppMountContext;

use super::use_shell_runtime;
use crate::{host::window_body_dom_id, model::WindowId, shell::ShellAction};

#[component]
pub(super) fn ShellWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_shell_runtime();

    let frame = Signal::derive(move || {
        runtime
            .view
            .get()
            .windows
            .into_iter()
            .find(|frame| frame.id == window_id)
    });

    // Mounted once; minimizing only hides the frame so widget state survives.
    let mount = runtime.controller.with_value(|shell| {
        let app_id = shell.windows().frame(window_id)?.app_id.clone();
        let content = shell.content(window_id)?.clone();
        Some((content, app_id, shell.services().clone()))
    });
    let body = match mount {
        Some((content, app_id, services)) => content.mount(AppMountContext {
            app_id,
            window_id: window_id.0,
            services,
        }),
        None => ().into_view(),
    };

    let title = frame.get_untracked().map(|f| f.title).unwrap_or_default();
    let icon = frame.get_untracked().map(|f| f.icon).unwrap_or_default();

    let focus = move |_| {
        let should_focus = frame
            .get_untracked()
            .map(|f| !f.is_focused)
            .unwrap_or(false);
        if should_focus {
            runtime.dispatch_action(ShellAction::FocusWindow(window_id));
        }
    };
    let minimize = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(ShellAction::MinimizeWindow(window_id));
    };
    let close = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(ShellAction::CloseWindow(window_id));
    };

    view! {
        <section
            class=move || {
                let Some(f) = frame.get() else {
                    return "kiosk-window".to_string();
                };
                format!(
                    "kiosk-window{}{}",
                    if f.is_focused { " focused" } else { "" },
                    if f.minimized { " minimized" } else { "" },
                )
            }
            style=move || {
                frame
                    .get()
                    .map(|f| {
                        format!(
                            "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                            f.rect.x, f.rect.y, f.rect.w, f.rect.h, f.z_index
                        )
                    })
                    .unwrap_or_default()
            }
            role="dialog"
            aria-label=title.clone()
            on:mousedown=focus
        >
            <header class="kiosk-titlebar">
                <span class="kiosk-titlebar-icon" aria-hidden="true">{icon}</span>
                <span class="kiosk-titlebar-title">{title}</span>
                <div class="kiosk-titlebar-controls">
                    <button
                        type="button"
                        aria-label="Minimize"
                        on:mousedown=|ev| ev.stop_propagation()
                        on:click=minimize
                    >
                        "_"
                    </button>
                    <button
                        type="button"
                        aria-label="Close"
                        on:mousedown=|ev| ev.stop_propagation()
                        on:click=close
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="kiosk-window-body" id=window_body_dom_id(window_id)>
                {body}
            </div>
        </section>
    }
}
