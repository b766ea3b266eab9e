//! Built-in local widgets shipped with the shell.

use ordo_app_contract::LocalAppModule;

use crate::resolver::{AppResolver, LocalAppRegistry};

const BUILTIN_MODULES: [LocalAppModule; 3] = [
    ordo_app_editor::EDITOR_MODULE,
    ordo_app_timer::TIMER_MODULE,
    ordo_app_todo::TODO_MODULE,
];

/// Registry holding every built-in local widget.
pub fn builtin_local_apps() -> LocalAppRegistry {
    BUILTIN_MODULES
        .into_iter()
        .fold(LocalAppRegistry::default(), LocalAppRegistry::with_module)
}

/// Resolver over [`builtin_local_apps`].
pub fn builtin_resolver() -> AppResolver {
    AppResolver::new(builtin_local_apps())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_widgets_are_registered_under_their_references() {
        assert_eq!(
            builtin_local_apps().references(),
            vec![
                "ordo.apps.editor.EditorWindow",
                "ordo.apps.timer.TimerWindow",
                "ordo.apps.todo.TodoWindow",
            ]
        );
    }
}
