//! Drains controller-emitted effects in order.

use leptos::*;

use crate::{host, runtime_context::ShellRuntimeContext};

/// Installs the effect executor for the shell runtime.
pub fn install(runtime: ShellRuntimeContext) {
    // Clear the queue before running so effects that dispatch again enqueue a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            host::run_shell_effect(effect);
        }
    });
}
