//! Browser `window.localStorage`.

use super::{KeyValueStore, StorageError};

/// Local storage of the current browser window.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Attach to the window's local storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] outside a browser window or when
    /// the browser refuses access (e.g., storage disabled by the user).
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no browser window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("local storage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A full store surfaces as a thrown QuotaExceededError DOMException.
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("failed to write {key:?}: {e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}
