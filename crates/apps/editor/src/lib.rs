//! Plain-text editor widget with debounced auto-save to the user text store.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{cell::RefCell, rc::Rc, time::Duration};

use leptos::*;
use ordo_app_contract::{AppMountContext, AppServices, LocalAppModule, LocalWidget};
use ordo_platform_host::TextStore;

/// Text store key of the editor document.
pub const EDITOR_STORAGE_KEY: &str = ".ordo_editor.txt";
/// Quiet period after the last edit before the document is saved.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);
/// Registration record for the editor widget.
pub const EDITOR_MODULE: LocalAppModule =
    LocalAppModule::new("ordo.apps.editor.EditorWindow", build_editor_window);

/// Auto-save state shown in the editor status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing saved yet in this session.
    AutoSaveEnabled,
    /// A save is in flight.
    Saving,
    /// The latest scheduled save succeeded.
    Saved,
    /// The latest scheduled save failed.
    Failed,
}

impl SaveStatus {
    /// Status line text.
    pub fn label(self) -> &'static str {
        match self {
            Self::AutoSaveEnabled => "Auto-save enabled",
            Self::Saving => "Saving...",
            Self::Saved => "Saved",
            Self::Failed => "Save failed",
        }
    }
}

/// Editor buffer with revision tracking for debounced saves.
///
/// Every edit bumps the revision. A save scheduled for an older revision is dropped, so only the
/// last edit of a burst reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDocument {
    text: String,
    revision: u64,
    saved_revision: u64,
    status: SaveStatus,
}

impl EditorDocument {
    /// Creates a clean document holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
            saved_revision: 0,
            status: SaveStatus::AutoSaveEnabled,
        }
    }

    /// Loads the persisted document. Read failures are logged and yield an empty document.
    pub fn load(store: &dyn TextStore) -> Self {
        match store.load_text(EDITOR_STORAGE_KEY) {
            Ok(text) => Self::new(text.unwrap_or_default()),
            Err(err) => {
                logging::warn!("editor document load failed: {err}");
                Self::new(String::new())
            }
        }
    }

    /// Current buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current auto-save status.
    pub fn status(&self) -> SaveStatus {
        self.status
    }

    /// Whether the buffer has edits that were not saved yet.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    /// Replaces the buffer and returns the revision a save should be scheduled for. The status
    /// reads [`SaveStatus::Saving`] until that save finishes.
    pub fn edit(&mut self, text: String) -> u64 {
        self.text = text;
        self.revision += 1;
        self.status = SaveStatus::Saving;
        self.revision
    }

    /// Starts saving `revision`. Returns the text to write, or `None` when a newer edit
    /// superseded it or nothing changed.
    pub fn begin_save(&mut self, revision: u64) -> Option<String> {
        if revision != self.revision || !self.is_dirty() {
            return None;
        }
        self.status = SaveStatus::Saving;
        Some(self.text.clone())
    }

    /// Records the outcome of a save started with [`Self::begin_save`].
    pub fn finish_save(&mut self, revision: u64, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.saved_revision = self.saved_revision.max(revision);
                self.status = SaveStatus::Saved;
            }
            Err(err) => {
                logging::warn!("editor auto-save failed: {err}");
                self.status = SaveStatus::Failed;
            }
        }
    }

    /// Saves `revision` to `store` if it is still the latest edit. Returns whether a write was
    /// attempted.
    pub fn save_revision(&mut self, store: &dyn TextStore, revision: u64) -> bool {
        let Some(text) = self.begin_save(revision) else {
            return false;
        };
        let result = store.save_text(EDITOR_STORAGE_KEY, &text);
        self.finish_save(revision, result);
        true
    }

    /// Saves the latest edit right away if it is not saved yet. Returns whether a write was
    /// attempted.
    pub fn flush(&mut self, store: &dyn TextStore) -> bool {
        let revision = self.revision;
        self.save_revision(store, revision)
    }
}

struct EditorWindow {
    document: Rc<RefCell<EditorDocument>>,
}

fn build_editor_window(services: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
    let document = EditorDocument::load(services.text_store.as_ref());
    Ok(Box::new(EditorWindow {
        document: Rc::new(RefCell::new(document)),
    }))
}

impl LocalWidget for EditorWindow {
    fn component_name(&self) -> &'static str {
        "EditorWindow"
    }

    fn mount(&self, context: AppMountContext) -> View {
        view! {
            <EditorView document=self.document.clone() store=context.services.text_store />
        }
        .into_view()
    }
}

/// Runs a debounced save. Does nothing once the editor view has been disposed.
fn save_scheduled(state: RwSignal<EditorDocument>, store: &dyn TextStore, revision: u64) -> bool {
    state
        .try_update(|doc| doc.save_revision(store, revision))
        .unwrap_or(false)
}

/// Writes the pending edit when the window closes before its debounced save ran.
fn flush_on_close(
    state: RwSignal<EditorDocument>,
    document: &RefCell<EditorDocument>,
    store: &dyn TextStore,
) -> bool {
    if let Some(latest) = state.try_get_untracked() {
        *document.borrow_mut() = latest;
    }
    document.borrow_mut().flush(store)
}

#[component]
fn EditorView(document: Rc<RefCell<EditorDocument>>, store: Rc<dyn TextStore>) -> impl IntoView {
    let state = create_rw_signal(document.borrow().clone());
    {
        let document = document.clone();
        create_effect(move |_| {
            *document.borrow_mut() = state.get();
        });
    }
    {
        let store = store.clone();
        on_cleanup(move || {
            flush_on_close(state, &document, store.as_ref());
        });
    }

    let on_input = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        let Some(revision) = state.try_update(|doc| doc.edit(text)) else {
            return;
        };
        let store = store.clone();
        set_timeout(
            move || {
                save_scheduled(state, store.as_ref(), revision);
            },
            AUTOSAVE_DELAY,
        );
    };

    view! {
        <div class="ordo-editor">
            <textarea
                class="ordo-editor-text"
                prop:value=move || state.with(|doc| doc.text().to_string())
                on:input=on_input
                spellcheck="false"
                autocomplete="off"
                aria-label="Text editor"
            />
            <div class="ordo-editor-status" role="status">
                {move || state.with(|doc| doc.status().label())}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use ordo_platform_host::MemoryTextStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_reads_persisted_text_or_starts_empty() {
        let store = MemoryTextStore::with_document(EDITOR_STORAGE_KEY, "draft");
        let doc = EditorDocument::load(&store);
        assert_eq!(doc.text(), "draft");
        assert_eq!(doc.status().label(), "Auto-save enabled");

        let empty = EditorDocument::load(&MemoryTextStore::default());
        assert_eq!(empty.text(), "");
        assert!(!empty.is_dirty());
    }

    #[test]
    fn only_the_latest_revision_is_saved() {
        let store = MemoryTextStore::default();
        let mut doc = EditorDocument::new("");
        let first = doc.edit("h".to_string());
        let second = doc.edit("hello".to_string());

        assert!(!doc.save_revision(&store, first));
        assert_eq!(store.document(EDITOR_STORAGE_KEY), None);

        assert!(doc.save_revision(&store, second));
        assert_eq!(store.document(EDITOR_STORAGE_KEY).as_deref(), Some("hello"));
        assert_eq!(doc.status(), SaveStatus::Saved);
        assert!(!doc.is_dirty());

        assert!(!doc.save_revision(&store, second));
    }

    #[test]
    fn failed_save_keeps_document_dirty() {
        let store = MemoryTextStore::default();
        store.fail_writes(true);
        let mut doc = EditorDocument::new("");
        let revision = doc.edit("unsaved".to_string());

        assert!(doc.save_revision(&store, revision));
        assert_eq!(doc.status().label(), "Save failed");
        assert!(doc.is_dirty());

        store.fail_writes(false);
        assert!(doc.save_revision(&store, revision));
        assert_eq!(doc.status().label(), "Saved");
    }

    #[test]
    fn status_reads_saving_from_edit_until_the_save_finishes() {
        let mut doc = EditorDocument::new("");
        let revision = doc.edit("typed".to_string());
        assert_eq!(doc.status().label(), "Saving...");
        assert_eq!(doc.begin_save(revision).as_deref(), Some("typed"));
        assert_eq!(doc.status().label(), "Saving...");
        doc.finish_save(revision, Ok(()));
        assert_eq!(doc.status().label(), "Saved");

        doc.edit("typed more".to_string());
        assert_eq!(doc.status(), SaveStatus::Saving);
    }

    #[test]
    fn flush_saves_only_unsaved_edits() {
        let store = MemoryTextStore::default();
        let mut doc = EditorDocument::new("kept");
        assert!(!doc.flush(&store));

        doc.edit("pending".to_string());
        assert!(doc.flush(&store));
        assert_eq!(store.document(EDITOR_STORAGE_KEY).as_deref(), Some("pending"));
        assert!(!doc.flush(&store));
    }

    #[test]
    fn closing_the_window_before_the_debounce_keeps_the_last_edit() {
        let runtime = create_runtime();
        let store = MemoryTextStore::default();
        let document = RefCell::new(EditorDocument::new(""));

        let mount = as_child_of_current_owner(|initial: EditorDocument| {
            let state = create_rw_signal(initial);
            let revision = state
                .try_update(|doc| doc.edit("last words".to_string()))
                .unwrap_or_default();
            (state, revision)
        });
        let ((state, revision), disposer) = mount(EditorDocument::new(""));
        *document.borrow_mut() = state.get_untracked();
        drop(disposer);

        assert!(!save_scheduled(state, &store, revision));
        assert_eq!(store.document(EDITOR_STORAGE_KEY), None);

        assert!(flush_on_close(state, &document, &store));
        assert_eq!(
            store.document(EDITOR_STORAGE_KEY).as_deref(),
            Some("last words")
        );

        runtime.dispose();
    }

    #[test]
    fn factory_loads_document_from_services() {
        let store = MemoryTextStore::with_document(EDITOR_STORAGE_KEY, "kept");
        let services = AppServices::new(Rc::new(store));
        let widget = EDITOR_MODULE.instantiate(&services).expect("editor builds");
        assert_eq!(widget.component_name(), "EditorWindow");
    }
}
