//! `localStorage`-backed text store for the browser host.

use super::text::TextStore;

/// Prefix applied to every key so shell documents do not collide with other page storage.
pub const LOCAL_TEXT_KEY_PREFIX: &str = "ordo.";

#[derive(Debug, Clone, Copy, Default)]
/// Browser text store backed by `window.localStorage`.
pub struct WebTextStore;

fn storage_key(key: &str) -> String {
    format!("{LOCAL_TEXT_KEY_PREFIX}{}", key.trim_start_matches('.'))
}

impl TextStore for WebTextStore {
    fn load_text(&self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .get_item(&storage_key(key))
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = storage_key(key);
            Ok(None)
        }
    }

    fn save_text(&self, key: &str, text: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(&storage_key(key), text)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (storage_key(key), text);
            Ok(())
        }
    }
}
