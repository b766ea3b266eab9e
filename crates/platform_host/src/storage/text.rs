//! Plain-text storage contracts and adapters keyed by file name.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for small per-user text documents.
pub trait TextStore {
    /// Loads the text stored under `key`, or `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored document exists but cannot be read.
    fn load_text(&self, key: &str) -> Result<Option<String>, String>;

    /// Replaces the text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    fn save_text(&self, key: &str, text: &str) -> Result<(), String>;
}

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("Storage key must not be empty".to_string());
    }
    if key.contains('/') || key.contains('\\') || key == "." || key == ".." {
        return Err(format!("Storage key `{key}` must be a plain file name"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op text store for unsupported targets.
pub struct NoopTextStore;

impl TextStore for NoopTextStore {
    fn load_text(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_text(&self, _key: &str, _text: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory text store keyed by file name.
pub struct MemoryTextStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryTextStore {
    /// Creates a store pre-populated with one document.
    pub fn with_document(key: &str, text: &str) -> Self {
        let store = Self::default();
        store
            .inner
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
        store
    }

    /// Makes every subsequent write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Returns the stored document without going through the trait.
    pub fn document(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl TextStore for MemoryTextStore {
    fn load_text(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_text(&self, key: &str, text: &str) -> Result<(), String> {
        validate_key(key)?;
        if self.fail_writes.get() {
            return Err(format!("write to {key} rejected"));
        }
        self.inner
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Text store backed by files in a single directory.
pub struct FsTextStore {
    root: PathBuf,
}

impl FsTextStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| format!("failed to create store dir {}: {err}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Creates a store rooted at the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error when no home directory can be determined.
    pub fn user_home() -> Result<Self, String> {
        let home = dirs::home_dir().ok_or_else(|| "failed to resolve home dir".to_string())?;
        Self::from_root(home)
    }

    /// Absolute path of the document stored under `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl TextStore for FsTextStore {
    fn load_text(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))
    }

    fn save_text(&self, key: &str, text: &str) -> Result<(), String> {
        validate_key(key)?;
        let path = self.path_for(key);
        fs::write(&path, text).map_err(|err| format!("failed to write {}: {err}", path.display()))
    }
}

/// Loads and deserializes a JSON document through a [`TextStore`].
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub fn load_json_with<S: TextStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_text(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes a value as pretty-printed JSON and saves it through a [`TextStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_json_with<S: TextStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    store.save_text(key, &raw)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        text: String,
        completed: bool,
    }

    fn temp_dir_path() -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("ordo_text_store_{}_{}", process::id(), now))
    }

    #[test]
    fn memory_store_round_trip_and_failing_writes() {
        let store = MemoryTextStore::default();
        let store_obj: &dyn TextStore = &store;

        assert_eq!(store_obj.load_text(".note").expect("load"), None);
        store_obj.save_text(".note", "hello").expect("save");
        assert_eq!(
            store_obj.load_text(".note").expect("load"),
            Some("hello".to_string())
        );

        store.fail_writes(true);
        assert!(store_obj.save_text(".note", "lost").is_err());
        assert_eq!(store.document(".note"), Some("hello".to_string()));
    }

    #[test]
    fn keys_must_be_plain_file_names() {
        let store = MemoryTextStore::default();
        assert_eq!(
            store.load_text("").expect_err("empty key"),
            "Storage key must not be empty"
        );
        assert!(store.save_text("../escape", "x").is_err());
        assert!(store.save_text("dir/file", "x").is_err());
    }

    #[test]
    fn fs_store_reads_missing_as_none_and_writes_files() {
        let root = temp_dir_path();
        let store = FsTextStore::from_root(&root).expect("init fs store");

        assert_eq!(store.load_text(".ordo_editor.txt").expect("load"), None);
        store
            .save_text(".ordo_editor.txt", "draft")
            .expect("save note");
        assert_eq!(
            fs::read_to_string(root.join(".ordo_editor.txt")).expect("read back"),
            "draft"
        );
        assert_eq!(
            store.load_text(".ordo_editor.txt").expect("load"),
            Some("draft".to_string())
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn typed_json_helpers_round_trip() {
        let store = MemoryTextStore::default();
        let items = vec![Entry {
            text: "milk".to_string(),
            completed: false,
        }];
        save_json_with(&store, ".todos.json", &items).expect("save json");
        assert!(store
            .document(".todos.json")
            .expect("stored")
            .contains("\n  {"));

        let loaded: Option<Vec<Entry>> = load_json_with(&store, ".todos.json").expect("load json");
        assert_eq!(loaded, Some(items));

        store.save_text(".todos.json", "{not json").expect("save raw");
        assert!(load_json_with::<_, Vec<Entry>>(&store, ".todos.json").is_err());
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopTextStore;
        assert_eq!(store.load_text("k").expect("load"), None);
        store.save_text("k", "v").expect("save");
    }
}
