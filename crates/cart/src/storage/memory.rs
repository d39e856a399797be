//! In-memory store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStore, StorageError};

/// A `HashMap`-backed store.
///
/// Clones share the same entries, so a test can keep a handle to inspect
/// what the cart wrote or to break the store mid-session. An optional byte
/// quota (keys plus values) mimics local storage's capacity limit.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug)]
struct Inner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    available: bool,
}

impl MemoryStore {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                quota: None,
                available: true,
            })),
        }
    }

    /// Create an empty store holding at most `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().quota = Some(quota);
        store
    }

    /// Switch the store on or off. While off, every call fails with
    /// [`StorageError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.inner.borrow_mut().available = available;
    }

    /// Bytes currently held (keys plus values).
    #[must_use]
    pub fn usage(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    /// Whether `key` has a value, ignoring availability.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.inner.borrow().available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("memory store disabled".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;

        let mut inner = self.inner.borrow_mut();
        if let Some(quota) = inner.quota {
            let others: usize = inner
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let remaining = quota.saturating_sub(others);
            if needed > remaining {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    remaining,
                });
            }
        }

        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.inner.borrow_mut().entries.remove(key);
        Ok(())
    }
}
