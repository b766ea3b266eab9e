//! Runtime provider and context wiring for the kiosk shell.
//!
//! The [`ShellController`] lives in a [`StoredValue`] and is only mutated from event callbacks.
//! After every dispatch a plain-data [`ShellView`] snapshot is published for the UI in
//! [`crate::components`].

use leptos::*;

use crate::{
    effect_executor,
    shell::{ShellAction, ShellController, ShellEffect, ShellView, ShortcutKey},
};

#[derive(Clone, Copy)]
/// Leptos context for reading shell state and dispatching [`ShellAction`] values.
pub struct ShellRuntimeContext {
    /// Controller owning the registry, resolver, and open windows.
    pub controller: StoredValue<ShellController>,
    /// Snapshot of the controller state, refreshed after every dispatch.
    pub view: RwSignal<ShellView>,
    /// Effects emitted by the controller and not yet executed.
    pub effects: RwSignal<Vec<ShellEffect>>,
    /// Action dispatch callback.
    pub dispatch: Callback<ShellAction>,
    /// Keyboard shortcut callback.
    pub shortcut: Callback<ShortcutKey>,
}

impl ShellRuntimeContext {
    pub fn dispatch_action(&self, action: ShellAction) {
        self.dispatch.call(action);
    }

    pub fn handle_shortcut(&self, key: ShortcutKey) {
        self.shortcut.call(key);
    }
}

fn publish(
    controller: StoredValue<ShellController>,
    view: RwSignal<ShellView>,
    effects: RwSignal<Vec<ShellEffect>>,
    new_effects: Vec<ShellEffect>,
) {
    let next = controller.with_value(ShellController::view_state);
    if next != view.get_untracked() {
        view.set(next);
    }
    if !new_effects.is_empty() {
        let mut queue = effects.get_untracked();
        queue.extend(new_effects);
        effects.set(queue);
    }
}

#[component]
/// Provides [`ShellRuntimeContext`] to descendant components.
pub fn ShellProvider(
    /// Fully constructed controller; the catalog is already loaded.
    controller: ShellController,
    children: Children,
) -> impl IntoView {
    let boot_effects = controller.boot_effects();
    let view = create_rw_signal(controller.view_state());
    let controller = store_value(controller);
    let effects = create_rw_signal(boot_effects);

    let dispatch = Callback::new(move |action: ShellAction| {
        let mut emitted = Vec::new();
        controller.update_value(|shell| emitted = shell.dispatch(action));
        publish(controller, view, effects, emitted);
    });
    let shortcut = Callback::new(move |key: ShortcutKey| {
        let mut emitted = Vec::new();
        controller.update_value(|shell| emitted = shell.handle_shortcut(key));
        publish(controller, view, effects, emitted);
    });

    let runtime = ShellRuntimeContext {
        controller,
        view,
        effects,
        dispatch,
        shortcut,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`ShellRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ShellProvider`].
pub fn use_shell_runtime() -> ShellRuntimeContext {
    use_context::<ShellRuntimeContext>().expect("ShellRuntimeContext not provided")
}
