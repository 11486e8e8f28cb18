//! Session configuration (environment driven).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::comparison::DEFAULT_COMPARE_CAPACITY;
use crate::recency::DEFAULT_RECENT_CAPACITY;
use crate::store::FileKeyValueStore;

pub const ENV_RECENT_CAPACITY: &str = "STOREFRONT_RECENT_CAPACITY";
pub const ENV_COMPARE_CAPACITY: &str = "STOREFRONT_COMPARE_CAPACITY";
pub const ENV_DATA_DIR: &str = "STOREFRONT_DATA_DIR";

pub const RECENTLY_VIEWED_KEY: &str = "recently_viewed";
pub const COMPARISON_KEY: &str = "comparison";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub recent_capacity: usize,
    pub compare_capacity: usize,
    /// `None` resolves to the per-user data directory.
    pub data_dir: Option<PathBuf>,
    pub recently_viewed_key: String,
    pub comparison_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            compare_capacity: DEFAULT_COMPARE_CAPACITY,
            data_dir: None,
            recently_viewed_key: RECENTLY_VIEWED_KEY.to_string(),
            comparison_key: COMPARISON_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`; unset, unparseable or zero capacities
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            recent_capacity: capacity(&lookup, ENV_RECENT_CAPACITY, defaults.recent_capacity),
            compare_capacity: capacity(&lookup, ENV_COMPARE_CAPACITY, defaults.compare_capacity),
            data_dir: lookup(ENV_DATA_DIR)
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            ..defaults
        }
    }

    /// Configured data directory, or the per-user default.
    pub fn resolve_data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileKeyValueStore::default_location(),
        }
    }
}

fn capacity(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: usize) -> usize {
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!(variable = name, value = %raw, default, "invalid capacity; using default");
            default
        }
    }
}
