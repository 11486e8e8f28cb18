//! Deterministic catalog ordering.

use core::cmp::Ordering;

use storefront_products::Product;

use crate::filter::SortKey;

/// Total orderings over products, one per [`SortKey`].
///
/// Sorting never touches the input slice; a new vector is returned. Ties are
/// broken by ascending id so equal prices or ratings always come out in the
/// same order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortPolicy;

impl SortPolicy {
    pub fn sort(products: &[Product], key: SortKey) -> Vec<Product> {
        let mut sorted = products.to_vec();
        sorted.sort_by(|a, b| Self::compare(key, a, b));
        sorted
    }

    /// `None` sorts as [`SortKey::Newest`].
    pub fn sort_optional(products: &[Product], key: Option<SortKey>) -> Vec<Product> {
        Self::sort(products, key.unwrap_or_default())
    }

    /// Sort by the key's query-string name; unknown names sort as newest.
    pub fn sort_by_name(products: &[Product], name: &str) -> Vec<Product> {
        Self::sort(products, SortKey::parse_or_default(name))
    }

    pub fn compare(key: SortKey, a: &Product, b: &Product) -> Ordering {
        match key {
            SortKey::Newest => b.id.cmp(&a.id),
            SortKey::PriceAsc => a.price.total_cmp(&b.price).then_with(|| a.id.cmp(&b.id)),
            SortKey::PriceDesc => b.price.total_cmp(&a.price).then_with(|| a.id.cmp(&b.id)),
            SortKey::Popularity => b.rating.total_cmp(&a.rating).then_with(|| a.id.cmp(&b.id)),
        }
    }
}
