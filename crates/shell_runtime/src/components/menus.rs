use leptos::*;

use super::{
    a11y::{focus_first_menu_item, handle_menu_roving_keydown},
    use_shell_runtime, START_MENU_DOM_ID,
};
use crate::{
    host::desktop_viewport_rect,
    shell::{menu_rect, MenuItem, ShellAction, TASKBAR_HEIGHT},
};

fn menu_item_dom_id(index: usize) -> String {
    format!("{START_MENU_DOM_ID}-item-{index}")
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_shell_runtime();
    let view_state = runtime.view;
    let is_open = create_memo(move |_| view_state.get().start_menu_open);

    create_effect(move |was_open: Option<bool>| {
        let open = is_open.get();
        if open && !was_open.unwrap_or(false) {
            request_animation_frame(move || {
                let _ = focus_first_menu_item(START_MENU_DOM_ID);
            });
        }
        open
    });

    view! {
        <Show when=move || is_open.get() fallback=|| ()>
            {move || {
                let rect = menu_rect(desktop_viewport_rect(), TASKBAR_HEIGHT);
                let items = view_state.get_untracked().menu_items;
                view! {
                    <nav
                        id=START_MENU_DOM_ID
                        class="start-menu"
                        role="menu"
                        aria-label="Start"
                        style=format!(
                            "left:{}px;top:{}px;width:{}px;height:{}px;",
                            rect.x, rect.y, rect.w, rect.h
                        )
                        on:keydown=move |ev| {
                            let _ = handle_menu_roving_keydown(&ev, START_MENU_DOM_ID);
                        }
                    >
                        {items
                            .into_iter()
                            .enumerate()
                            .map(|(index, item)| {
                                let activate = move |_| {
                                    runtime.dispatch_action(ShellAction::ActivateMenuItem(index))
                                };
                                match item {
                                    MenuItem::App { title, icon, .. } => view! {
                                        <button
                                            type="button"
                                            id=menu_item_dom_id(index)
                                            class="start-menu-item"
                                            role="menuitem"
                                            on:click=activate
                                        >
                                            <span aria-hidden="true">{icon}</span>
                                            <span>{title}</span>
                                        </button>
                                    }
                                    .into_view(),
                                    MenuItem::Shutdown { label } => view! {
                                        <hr class="start-menu-separator" />
                                        <button
                                            type="button"
                                            id=menu_item_dom_id(index)
                                            class="start-menu-item shutdown"
                                            role="menuitem"
                                            on:click=activate
                                        >
                                            {label}
                                        </button>
                                    }
                                    .into_view(),
                                }
                            })
                            .collect_view()}
                    </nav>
                }
            }}
        </Show>
    }
}
