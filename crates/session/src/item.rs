use serde::Serialize;
use serde::de::DeserializeOwned;

use storefront_core::{DomainResult, Entity};
use storefront_products::Product;

/// Anything the session caches can hold and persist.
///
/// Identity comes from [`Entity::id`]; `validate` is the schema check applied
/// to every record read back from the store.
pub trait CacheItem: Entity + Clone + Serialize + DeserializeOwned {
    fn validate(&self) -> DomainResult<()>;

    /// Human-readable name used in notifications.
    fn display_name(&self) -> &str;
}

impl CacheItem for Product {
    fn validate(&self) -> DomainResult<()> {
        Product::validate(self)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
