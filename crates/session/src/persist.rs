//! Write-through persistence of an ordered item list under one store key.

use std::collections::HashSet;

use crate::error::StoreError;
use crate::item::CacheItem;
use crate::store::KeyValueStore;

#[derive(Debug)]
pub(crate) struct PersistedList<S> {
    store: S,
    key: String,
    degraded: bool,
}

impl<S: KeyValueStore> PersistedList<S> {
    pub(crate) fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            degraded: false,
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Read the persisted list, or an empty one if it is missing or fails
    /// validation. Duplicate ids keep their first occurrence and the result is
    /// cut to `capacity`.
    pub(crate) fn load<T: CacheItem>(&mut self, capacity: usize) -> Vec<T> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "session store unreadable; starting empty");
                self.degraded = true;
                return Vec::new();
            }
        };

        let items: Vec<T> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "discarding malformed persisted list");
                return Vec::new();
            }
        };

        if let Some(err) = items.iter().find_map(|item| item.validate().err()) {
            tracing::warn!(key = %self.key, %err, "discarding persisted list that failed validation");
            return Vec::new();
        }

        let loaded = items.len();
        let mut seen = HashSet::new();
        let mut items: Vec<T> = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();
        items.truncate(capacity);
        if items.len() != loaded {
            tracing::warn!(
                key = %self.key,
                loaded,
                kept = items.len(),
                "dropped duplicate or over-capacity entries on load"
            );
        }

        items
    }

    /// Persist the whole list. Failures are logged and mark the list degraded;
    /// the next successful write clears the flag.
    pub(crate) fn write<T: CacheItem>(&mut self, items: &[T]) {
        let result = serde_json::to_string(items)
            .map_err(StoreError::from)
            .and_then(|json| self.store.set(&self.key, &json));

        match result {
            Ok(()) => self.degraded = false,
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "failed to persist session list; continuing in memory");
                self.degraded = true;
            }
        }
    }

    /// Delete the persisted representation.
    pub(crate) fn erase(&mut self) {
        match self.store.remove(&self.key) {
            Ok(()) => self.degraded = false,
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "failed to erase persisted session list");
                self.degraded = true;
            }
        }
    }
}
