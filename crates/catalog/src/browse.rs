//! Query string -> ordered product list.
//!
//! decode -> provider fetch -> optional keyword narrowing -> sort -> page.
//!
//! The page window is taken last, so page one of `priceAsc` holds the
//! cheapest matches in the whole catalog.

use serde::Serialize;

use storefront_products::Product;

use crate::codec::FilterCodec;
use crate::error::CatalogError;
use crate::filter::Filter;
use crate::provider::{CatalogProvider, Pagination};
use crate::search::SearchIndex;
use crate::sort::SortPolicy;

/// What the listing page renders for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub filter: Filter,
    pub products: Vec<Product>,
    /// Whether a keyword narrowed the provider's candidates.
    pub is_searching: bool,
    /// Matches across all pages, after keyword narrowing.
    pub total: u64,
    pub has_more: bool,
}

/// Decode `query` and build the view from `provider`.
pub fn browse<P>(provider: &P, query: &str, page: Option<Pagination>) -> Result<CatalogView, CatalogError>
where
    P: CatalogProvider + ?Sized,
{
    browse_filter(provider, FilterCodec::decode(query), page)
}

/// Build the view for an already decoded filter.
pub fn browse_filter<P>(
    provider: &P,
    filter: Filter,
    page: Option<Pagination>,
) -> Result<CatalogView, CatalogError>
where
    P: CatalogProvider + ?Sized,
{
    let fetched = provider.fetch(&filter, None)?;

    let (candidates, is_searching) = match filter.search() {
        Some(keyword) => {
            let outcome = SearchIndex::build(&fetched.products).search(keyword);
            (outcome.results, outcome.is_searching)
        }
        None => (fetched.products, false),
    };

    let sorted = SortPolicy::sort_optional(&candidates, filter.sort_by());
    let total = sorted.len() as u64;
    let (products, has_more) = match page {
        Some(page) => page.slice(&sorted),
        None => (sorted, false),
    };
    tracing::debug!(
        query = %FilterCodec::encode(&filter),
        total,
        shown = products.len(),
        "catalog view built"
    );

    Ok(CatalogView {
        filter,
        products,
        is_searching,
        total,
        has_more,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{CatalogPage, InMemoryCatalog};

    struct Offline;

    impl CatalogProvider for Offline {
        fn fetch(&self, _: &Filter, _: Option<Pagination>) -> Result<CatalogPage, CatalogError> {
            Err(CatalogError::Unavailable("timeout".into()))
        }
    }

    #[test]
    fn provider_failure_propagates() {
        let err = browse(&Offline, "?sortBy=newest", None).unwrap_err();
        assert_eq!(err, CatalogError::Unavailable("timeout".into()));
    }

    fn priced_lamps() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            Product::new("1", "Desk Lamp", 50.0),
            Product::new("2", "Floor Lamp", 40.0),
            Product::new("3", "Reading Lamp", 5.0),
            Product::new("4", "Cable Tie", 1.0),
        ])
    }

    fn ids(view: &CatalogView) -> Vec<&str> {
        view.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn first_page_holds_the_cheapest_products_of_the_whole_catalog() {
        let page = Pagination::new(Some(2), Some(0));
        let view = browse(&priced_lamps(), "sortBy=priceAsc", Some(page)).unwrap();
        assert_eq!(ids(&view), ["4", "3"]);
        assert_eq!(view.total, 4);
        assert!(view.has_more);
    }

    #[test]
    fn keyword_matches_are_paged_after_narrowing() {
        let page = Pagination::new(Some(1), Some(2));
        let view = browse(&priced_lamps(), "search=lamp&sortBy=priceDesc", Some(page)).unwrap();
        assert_eq!(ids(&view), ["3"]);
        assert_eq!(view.total, 3);
        assert!(!view.has_more);
    }

    #[test]
    fn no_search_keeps_all_candidates() {
        let catalog = InMemoryCatalog::new(vec![
            Product::new("1", "Cap", 15.0),
            Product::new("2", "Scarf", 30.0),
        ]);
        let view = browse(&catalog, "", None).unwrap();
        assert!(!view.is_searching);
        assert_eq!(view.products.len(), 2);
        assert!(view.filter.is_empty());
    }
}
