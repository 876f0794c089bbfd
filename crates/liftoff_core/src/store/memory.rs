//! In-memory key/value adapter used by tests and ephemeral sessions.

use super::{KeyValueStore, StoreError, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Single-threaded in-memory store with an optional byte quota.
///
/// The quota counts key and value bytes of all entries, so writes can be
/// made to fail the same way a full browser profile would.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose total size may not exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(stored_key, _)| stored_key.as_str() != key)
            .map(|(stored_key, value)| stored_key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(limit_bytes) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit_bytes {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    limit_bytes,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn set_get_remove_roundtrip() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "emerald").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("emerald"));

        store.remove("theme").unwrap();
        store.remove("theme").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let store = MemoryKeyValueStore::with_quota(16);
        store.set("tier", "pro").unwrap();

        let err = store
            .set("tier", "a value that is far too long")
            .expect_err("write over quota must fail");
        assert!(matches!(err, StoreError::QuotaExceeded { limit_bytes: 16, .. }));
        assert_eq!(store.get("tier").unwrap().as_deref(), Some("pro"));
    }

    #[test]
    fn quota_accounts_for_replaced_value() {
        let store = MemoryKeyValueStore::with_quota(10);
        store.set("tier", "ultra").unwrap();
        store.set("tier", "free").unwrap();
        assert_eq!(store.len(), 1);
    }
}
