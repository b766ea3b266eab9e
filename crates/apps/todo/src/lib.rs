//! To-do list widget persisted as JSON in the user text store.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{cell::RefCell, rc::Rc};

use leptos::*;
use ordo_app_contract::{AppMountContext, AppServices, LocalAppModule, LocalWidget};
use ordo_platform_host::{load_json_with, save_json_with, TextStore};
use serde::{Deserialize, Serialize};

/// Text store key of the to-do list.
pub const TODO_STORAGE_KEY: &str = ".ordo_todos.json";
/// Registration record for the to-do widget.
pub const TODO_MODULE: LocalAppModule =
    LocalAppModule::new("ordo.apps.todo.TodoWindow", build_todo_window);

/// One to-do item as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Item text.
    pub text: String,
    /// Whether the item is done.
    pub completed: bool,
}

impl TodoItem {
    /// `[x] text` or `[ ] text`.
    pub fn render_line(&self) -> String {
        let mark = if self.completed { 'x' } else { ' ' };
        format!("[{mark}] {}", self.text)
    }
}

/// Ordered to-do items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    /// Loads the persisted list. Missing, unreadable, or unparseable documents yield an empty list.
    pub fn load(store: &dyn TextStore) -> Self {
        match load_json_with::<_, Vec<TodoItem>>(store, TODO_STORAGE_KEY) {
            Ok(items) => Self {
                items: items.unwrap_or_default(),
            },
            Err(err) => {
                logging::warn!("to-do list load failed, starting empty: {err}");
                Self::default()
            }
        }
    }

    /// Writes the list as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the store or serialization error.
    pub fn save(&self, store: &dyn TextStore) -> Result<(), String> {
        save_json_with(store, TODO_STORAGE_KEY, &self.items)
    }

    /// Items in display order.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Appends an open item. Blank input is ignored; returns whether an item was added.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.items.push(TodoItem {
            text: text.to_string(),
            completed: false,
        });
        true
    }

    /// Flips the completion flag of the item at `index`; returns whether it exists.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.completed = !item.completed;
        true
    }

    /// Display lines for every item.
    pub fn lines(&self) -> Vec<String> {
        self.items.iter().map(TodoItem::render_line).collect()
    }
}

struct TodoWindow {
    list: Rc<RefCell<TodoList>>,
}

fn build_todo_window(services: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
    let list = TodoList::load(services.text_store.as_ref());
    Ok(Box::new(TodoWindow {
        list: Rc::new(RefCell::new(list)),
    }))
}

impl LocalWidget for TodoWindow {
    fn component_name(&self) -> &'static str {
        "TodoWindow"
    }

    fn mount(&self, context: AppMountContext) -> View {
        view! { <TodoView list=self.list.clone() store=context.services.text_store /> }.into_view()
    }
}

#[derive(Clone, Copy)]
struct TodoState {
    items: RwSignal<TodoList>,
    shared: StoredValue<Rc<RefCell<TodoList>>>,
    store: StoredValue<Rc<dyn TextStore>>,
}

impl TodoState {
    /// Applies `change`; when it reports a mutation, persists the list and syncs the widget copy.
    fn apply(self, change: impl FnOnce(&mut TodoList) -> bool) {
        let changed = self.items.try_update(change).unwrap_or(false);
        if !changed {
            return;
        }
        let snapshot = self.items.get_untracked();
        if let Err(err) = self.store.with_value(|store| snapshot.save(store.as_ref())) {
            logging::warn!("to-do list save failed: {err}");
        }
        self.shared
            .with_value(|shared| *shared.borrow_mut() = snapshot);
    }
}

#[component]
fn TodoView(list: Rc<RefCell<TodoList>>, store: Rc<dyn TextStore>) -> impl IntoView {
    let initial = list.borrow().clone();
    let state = TodoState {
        items: create_rw_signal(initial),
        shared: store_value(list),
        store: store_value(store),
    };
    let draft = create_rw_signal(String::new());

    let add = move || {
        let text = draft.get_untracked();
        state.apply(|todos| todos.add(&text));
        draft.set(String::new());
    };

    view! {
        <div class="ordo-todo">
            <div class="ordo-todo-entry">
                <input
                    type="text"
                    aria-label="New to-do"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add();
                        }
                    }
                />
                <button type="button" on:click=move |_| add()>
                    "Add"
                </button>
            </div>
            <ul class="ordo-todo-list" role="list">
                {move || {
                    state
                        .items
                        .with(TodoList::lines)
                        .into_iter()
                        .enumerate()
                        .map(|(index, line)| {
                            view! {
                                <li
                                    class="ordo-todo-item"
                                    tabindex="0"
                                    on:dblclick=move |_| state.apply(|todos| todos.toggle(index))
                                >
                                    {line}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
