//! Catalog provider seam.
//!
//! The storefront does not own product data; it asks a provider for the
//! candidates matching a filter. Fetching (HTTP, cache, fixture file) is the
//! provider's business. `InMemoryCatalog` serves tests and the CLI.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use storefront_products::Product;

use crate::error::CatalogError;
use crate::filter::Filter;

/// Pagination parameters for catalog fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of products to return.
    pub limit: u32,
    /// Offset into the matching set (0-based).
    pub offset: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 24;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    /// The window of `items` this page covers, and whether more follow it.
    pub fn slice<T: Clone>(&self, items: &[T]) -> (Vec<T>, bool) {
        let start = (self.offset as usize).min(items.len());
        let end = start.saturating_add(self.limit as usize).min(items.len());
        (items[start..end].to_vec(), end < items.len())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Products returned for one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    /// Number of products matching the filter across all pages.
    pub total: u64,
    /// `None` when the full set was requested.
    pub pagination: Option<Pagination>,
    pub has_more: bool,
}

/// Source of candidate products for a filter.
pub trait CatalogProvider: Send + Sync {
    /// Fetch the products matching `filter`; the whole set when `page` is `None`.
    ///
    /// Providers apply the structural dimensions of the filter, in catalog
    /// order. Search text and ordering are the caller's job, so a caller that
    /// searches or sorts fetches the whole set and pages afterwards.
    fn fetch(&self, filter: &Filter, page: Option<Pagination>) -> Result<CatalogPage, CatalogError>;
}

impl<P> CatalogProvider for Arc<P>
where
    P: CatalogProvider + ?Sized,
{
    fn fetch(&self, filter: &Filter, page: Option<Pagination>) -> Result<CatalogPage, CatalogError> {
        (**self).fetch(filter, page)
    }
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a JSON array of products, rejecting records that fail validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        for product in &products {
            product
                .validate()
                .map_err(|e| CatalogError::Malformed(format!("product {}: {e}", product.id)))?;
        }
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn fetch(&self, filter: &Filter, page: Option<Pagination>) -> Result<CatalogPage, CatalogError> {
        let matching: Vec<Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        let total = matching.len() as u64;

        let (products, has_more) = match page {
            Some(page) => page.slice(&matching),
            None => (matching, false),
        };

        Ok(CatalogPage {
            products,
            total,
            pagination: page,
            has_more,
        })
    }
}
