//! `localStorage` as a [`KeyValueStore`].

use brick_editor::{KeyValueStore, PersistError};

/// The page's `window.localStorage`. Looked up on every access, so a page
/// without storage (private mode, sandboxed iframe) simply reads as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::backend()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let storage = Self::backend().ok_or_else(|| PersistError::Storage {
            key: key.to_string(),
            reason: "localStorage is unavailable".to_string(),
        })?;
        storage
            .set_item(key, value)
            .map_err(|e| PersistError::Storage {
                key: key.to_string(),
                reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
            })
    }
}
