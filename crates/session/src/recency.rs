//! Bounded most-recently-used list (e.g. "recently viewed").
//!
//! Front is the most recent entry. Adding an entry that is already present
//! moves it to the front; adding past capacity evicts from the back. Every
//! mutation is written through to the store before the call returns.

use crate::item::CacheItem;
use crate::persist::PersistedList;
use crate::store::KeyValueStore;

pub const DEFAULT_RECENT_CAPACITY: usize = 6;

#[derive(Debug)]
pub struct BoundedRecencyCache<T, S> {
    items: Vec<T>,
    capacity: usize,
    persisted: PersistedList<S>,
}

impl<T, S> BoundedRecencyCache<T, S>
where
    T: CacheItem,
    S: KeyValueStore,
{
    /// Load the cache stored under `key`, starting empty if nothing valid is there.
    pub fn new(store: S, key: impl Into<String>, capacity: usize) -> Self {
        let mut persisted = PersistedList::new(store, key);
        let items = persisted.load(capacity);
        tracing::debug!(key = persisted.key(), len = items.len(), capacity, "recency cache loaded");
        Self {
            items,
            capacity,
            persisted,
        }
    }

    /// [`BoundedRecencyCache::new`] with [`DEFAULT_RECENT_CAPACITY`].
    pub fn with_default_capacity(store: S, key: impl Into<String>) -> Self {
        Self::new(store, key, DEFAULT_RECENT_CAPACITY)
    }

    /// Most recent first.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// True while the last store operation failed.
    pub fn is_degraded(&self) -> bool {
        self.persisted.is_degraded()
    }

    /// Put `item` at the front, replacing an earlier entry with the same id.
    pub fn add(&mut self, item: T) {
        if let Some(pos) = self.items.iter().position(|existing| existing.id() == item.id()) {
            self.items.remove(pos);
        }
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
        tracing::debug!(key = self.persisted.key(), len = self.items.len(), "recency cache add");
        self.persisted.write(&self.items);
    }

    /// `None` leaves the cache untouched.
    pub fn add_optional(&mut self, item: Option<T>) {
        if let Some(item) = item {
            self.add(item);
        }
    }

    /// Remove the entry with `id`; absent ids are a no-op.
    pub fn remove(&mut self, id: &T::Id) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() != before {
            self.persisted.write(&self.items);
        }
    }

    /// Empty the cache and delete its persisted copy.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persisted.erase();
    }

    /// Change the capacity, evicting the oldest entries if the cache is now
    /// over it.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.items.len() > capacity {
            self.items.truncate(capacity);
            tracing::debug!(key = self.persisted.key(), capacity, "recency cache shrunk");
            self.persisted.write(&self.items);
        }
    }
}
