//! `storefront-session`
//!
//! **Responsibility:** per-shopper state that survives restarts.
//!
//! This crate provides:
//! - A bounded "recently viewed" recency cache (move-to-front, evict oldest)
//! - A bounded comparison set (insertion order, reject when full)
//! - The key-value store both persist to, write-through
//!
//! Neither cache ever surfaces a storage error: corrupt data loads as empty and
//! failed writes are logged while the in-memory state stays authoritative.

pub mod comparison;
pub mod config;
pub mod error;
pub mod item;
pub mod notify;
mod persist;
pub mod recency;
pub mod session;
pub mod store;

pub use comparison::{ComparisonSet, DEFAULT_COMPARE_CAPACITY};
pub use config::SessionConfig;
pub use error::StoreError;
pub use item::CacheItem;
pub use notify::{ComparisonNotice, NoticeKind, NotificationSink, RecordingSink, TracingSink};
pub use recency::{BoundedRecencyCache, DEFAULT_RECENT_CAPACITY};
pub use session::{Session, open_file_session};
pub use store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
