//! Browser-side execution of [`ShellEffect`]s and viewport queries.

use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    model::{WindowId, WindowRect},
    shell::ShellEffect,
};

const FOCUSABLE_CONTENT: &str = "textarea, input, button, iframe, [tabindex]";

/// DOM id of the content area of a shell window.
pub fn window_body_dom_id(window_id: WindowId) -> String {
    format!("ordo-window-body-{}", window_id.0)
}

pub(crate) fn run_shell_effect(effect: ShellEffect) {
    match effect {
        ShellEffect::FocusWindowInput(window_id) => focus_window_input(window_id),
        ShellEffect::SetFullscreen(enabled) => set_fullscreen(enabled),
        ShellEffect::Shutdown => shutdown(),
    }
}

fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let selector = format!("#{} :is({FOCUSABLE_CONTENT})", window_body_dom_id(window_id));
        let Ok(Some(element)) = document.query_selector(&selector) else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        // Deferred so the window body has been mounted by the time focus moves.
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (window_id, FOCUSABLE_CONTENT);
}

fn set_fullscreen(enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let is_fullscreen = document.fullscreen_element().is_some();
        let result = match (enabled, is_fullscreen) {
            (true, false) => document
                .document_element()
                .map(|root| root.request_fullscreen())
                .unwrap_or(Ok(())),
            (false, true) => {
                document.exit_fullscreen();
                Ok(())
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            logging::warn!("fullscreen request rejected: {err:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    logging::log!("fullscreen {}", if enabled { "on" } else { "off" });
}

/// Whether the document currently presents an element fullscreen.
pub fn is_document_fullscreen() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.document())
            .is_some_and(|document| document.fullscreen_element().is_some())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

fn shutdown() {
    logging::log!("kiosk session ended");
    #[cfg(target_arch = "wasm32")]
    {
        // Only effective for script-opened tabs; otherwise the shutdown screen stays up.
        if let Some(window) = web_sys::window() {
            let _ = window.close();
        }
    }
}

/// Browser viewport, taskbar included.
pub fn desktop_viewport_rect() -> WindowRect {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1024);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(768);

            return WindowRect {
                x: 0,
                y: 0,
                w: width.max(320),
                h: height.max(240),
            };
        }
    }

    WindowRect {
        x: 0,
        y: 0,
        w: 1024,
        h: 768,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_body_ids_are_stable() {
        assert_eq!(window_body_dom_id(WindowId(3)), "ordo-window-body-3");
    }

    #[test]
    fn native_document_is_never_fullscreen() {
        assert!(!is_document_fullscreen());
    }

    #[test]
    fn native_viewport_falls_back_to_default_size() {
        assert_eq!(
            desktop_viewport_rect(),
            WindowRect {
                x: 0,
                y: 0,
                w: 1024,
                h: 768
            }
        );
    }
}
