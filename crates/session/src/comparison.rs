//! Bounded product comparison set.
//!
//! Unlike the recency cache this is a stable queue: entries keep insertion
//! order, a duplicate `add` is rejected, and a full set rejects new ids instead
//! of evicting. Each `add` raises exactly one notice.
//!
//! The comparison panel's open flag is derived from the set's transitions: it
//! opens when an `add` lands in an empty set and closes when a `remove` leaves
//! at most one entry behind.

use std::sync::Arc;

use crate::item::CacheItem;
use crate::notify::{ComparisonNotice, NoticeKind, NotificationSink};
use crate::persist::PersistedList;
use crate::store::KeyValueStore;

pub const DEFAULT_COMPARE_CAPACITY: usize = 4;

pub struct ComparisonSet<T, S> {
    items: Vec<T>,
    capacity: usize,
    panel_open: bool,
    persisted: PersistedList<S>,
    sink: Arc<dyn NotificationSink>,
}

impl<T, S> core::fmt::Debug for ComparisonSet<T, S>
where
    T: core::fmt::Debug,
    S: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ComparisonSet")
            .field("items", &self.items)
            .field("capacity", &self.capacity)
            .field("panel_open", &self.panel_open)
            .field("persisted", &self.persisted)
            .finish_non_exhaustive()
    }
}

impl<T, S> ComparisonSet<T, S>
where
    T: CacheItem,
    S: KeyValueStore,
{
    /// Load the set stored under `key`. The panel starts closed.
    pub fn new(
        store: S,
        key: impl Into<String>,
        capacity: usize,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let mut persisted = PersistedList::new(store, key);
        let items = persisted.load(capacity);
        tracing::debug!(key = persisted.key(), len = items.len(), capacity, "comparison set loaded");
        Self {
            items,
            capacity,
            panel_open: false,
            persisted,
            sink,
        }
    }

    /// [`ComparisonSet::new`] with [`DEFAULT_COMPARE_CAPACITY`].
    pub fn with_default_capacity(
        store: S,
        key: impl Into<String>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::new(store, key, DEFAULT_COMPARE_CAPACITY, sink)
    }

    /// Insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn is_degraded(&self) -> bool {
        self.persisted.is_degraded()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Append `item` unless its id is present or the set is full.
    pub fn add(&mut self, item: T) -> NoticeKind {
        let outcome = if self.contains(item.id()) {
            NoticeKind::Duplicate
        } else if self.is_full() {
            NoticeKind::Full
        } else {
            NoticeKind::Added
        };

        let name = item.display_name().to_string();
        if outcome == NoticeKind::Added {
            let was_empty = self.items.is_empty();
            self.items.push(item);
            self.persisted.write(&self.items);
            if was_empty {
                self.panel_open = true;
            }
        }

        tracing::debug!(key = self.persisted.key(), outcome = outcome.as_str(), len = self.items.len(), "comparison add");
        self.sink.notify(ComparisonNotice::new(outcome, name));
        outcome
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &T::Id) -> bool {
        let Some(pos) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        self.items.remove(pos);
        self.persisted.write(&self.items);
        if self.items.len() <= 1 {
            self.panel_open = false;
        }
        true
    }

    /// Empty the set, delete its persisted copy and close the panel.
    pub fn clear(&mut self) {
        self.items.clear();
        self.panel_open = false;
        self.persisted.erase();
    }
}
