use thiserror::Error;

/// Failures of the persistent key-value store backing the session caches.
///
/// Caches never hand these to their callers: they are logged and the cache
/// carries on in memory.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize cache contents: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store quota exceeded (limit {limit} bytes, needed {needed})")]
    QuotaExceeded { limit: usize, needed: usize },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
