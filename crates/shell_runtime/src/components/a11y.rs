//! Start menu keyboard focus helpers.

use wasm_bindgen::JsCast;

fn active_element_id() -> String {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .map(|element| element.id())
        .unwrap_or_default()
}

fn menu_items(menu_id: &str) -> Vec<web_sys::HtmlElement> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Vec::new();
    };
    let Some(menu) = document.get_element_by_id(menu_id) else {
        return Vec::new();
    };
    let Ok(nodes) = menu.query_selector_all(r#"[role="menuitem"]"#) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

fn focus_item_at(menu_id: &str, pick: impl FnOnce(usize, Option<usize>) -> usize) -> bool {
    let items = menu_items(menu_id);
    if items.is_empty() {
        return false;
    }
    let active_id = active_element_id();
    let current = items
        .iter()
        .position(|item| !active_id.is_empty() && item.id() == active_id);
    let index = pick(items.len(), current).min(items.len() - 1);
    let _ = items[index].focus();
    true
}

/// Focuses the first item of a menu container.
pub(super) fn focus_first_menu_item(menu_id: &str) -> bool {
    focus_item_at(menu_id, |_, _| 0)
}

/// Arrow/Home/End navigation inside a menu. Prevents the default action when handled.
pub(super) fn handle_menu_roving_keydown(ev: &web_sys::KeyboardEvent, menu_id: &str) -> bool {
    let step = |delta: i32| {
        move |len: usize, current: Option<usize>| {
            let current = current.unwrap_or(0) as i32;
            (current + delta).rem_euclid(len as i32) as usize
        }
    };
    let handled = match ev.key().as_str() {
        "ArrowDown" => focus_item_at(menu_id, step(1)),
        "ArrowUp" => focus_item_at(menu_id, step(-1)),
        "Home" => focus_item_at(menu_id, |_, _| 0),
        "End" => focus_item_at(menu_id, |len, _| len - 1),
        _ => false,
    };

    if handled {
        ev.prevent_default();
        ev.stop_propagation();
    }
    handled
}
