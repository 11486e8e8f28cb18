//! Per-session wiring of the two caches over one shared store.

use std::sync::Arc;

use storefront_products::Product;

use crate::comparison::ComparisonSet;
use crate::config::SessionConfig;
use crate::notify::NotificationSink;
use crate::recency::BoundedRecencyCache;
use crate::store::{FileKeyValueStore, KeyValueStore};

/// "Recently viewed" plus "compare" for one shopper.
///
/// Both caches share the store but own distinct keys.
#[derive(Debug)]
pub struct Session<S> {
    recently_viewed: BoundedRecencyCache<Product, S>,
    comparison: ComparisonSet<Product, S>,
}

impl<S> Session<S>
where
    S: KeyValueStore + Clone,
{
    pub fn open(config: &SessionConfig, store: S, sink: Arc<dyn NotificationSink>) -> Self {
        let recently_viewed = BoundedRecencyCache::new(
            store.clone(),
            config.recently_viewed_key.clone(),
            config.recent_capacity,
        );
        let comparison = ComparisonSet::new(
            store,
            config.comparison_key.clone(),
            config.compare_capacity,
            sink,
        );
        tracing::info!(
            recently_viewed = recently_viewed.len(),
            comparison = comparison.len(),
            "session loaded"
        );
        Self {
            recently_viewed,
            comparison,
        }
    }

    /// Record a product detail view.
    pub fn record_view(&mut self, product: &Product) {
        self.recently_viewed.add(product.clone());
    }

    pub fn recently_viewed(&self) -> &BoundedRecencyCache<Product, S> {
        &self.recently_viewed
    }

    pub fn recently_viewed_mut(&mut self) -> &mut BoundedRecencyCache<Product, S> {
        &mut self.recently_viewed
    }

    pub fn comparison(&self) -> &ComparisonSet<Product, S> {
        &self.comparison
    }

    pub fn comparison_mut(&mut self) -> &mut ComparisonSet<Product, S> {
        &mut self.comparison
    }
}

/// Open a session persisted under the configured data directory.
pub fn open_file_session(
    config: &SessionConfig,
    sink: Arc<dyn NotificationSink>,
) -> anyhow::Result<Session<Arc<FileKeyValueStore>>> {
    use anyhow::Context;

    let dir = config.resolve_data_dir()?;
    let store = FileKeyValueStore::open(&dir)
        .with_context(|| format!("failed to open session store at {}", dir.display()))?;
    Ok(Session::open(config, Arc::new(store), sink))
}
