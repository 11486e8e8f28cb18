//! Keyword matching over a product collection.
//!
//! A product matches when its name, description, category or any tag contains
//! the keyword as a case-insensitive substring. A blank keyword produces no
//! results at all; callers tell "no active search" apart from "nothing matched"
//! through [`SearchOutcome::is_searching`].

use storefront_products::Product;

/// Result of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub results: Vec<Product>,
    /// False only when the keyword was the empty string.
    pub is_searching: bool,
}

/// Lower-cased haystacks for a borrowed product slice, built once and queried
/// many times (e.g. on every keystroke).
#[derive(Debug)]
pub struct SearchIndex<'a> {
    entries: Vec<IndexedProduct<'a>>,
}

#[derive(Debug)]
struct IndexedProduct<'a> {
    product: &'a Product,
    fields: Vec<String>,
}

impl<'a> SearchIndex<'a> {
    pub fn build(products: &'a [Product]) -> Self {
        let entries = products
            .iter()
            .map(|product| {
                let mut fields = Vec::with_capacity(3 + product.tags.len());
                fields.push(product.name.to_lowercase());
                if let Some(description) = &product.description {
                    fields.push(description.to_lowercase());
                }
                fields.push(product.category.to_lowercase());
                fields.extend(product.tags.iter().map(|t| t.to_lowercase()));
                IndexedProduct { product, fields }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matching products in index order. Ordering is not part of the contract;
    /// run the result through `SortPolicy`.
    pub fn search(&self, keyword: &str) -> SearchOutcome {
        let is_searching = !keyword.is_empty();
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return SearchOutcome {
                results: Vec::new(),
                is_searching,
            };
        }

        let results = self
            .entries
            .iter()
            .filter(|entry| entry.fields.iter().any(|f| f.contains(&needle)))
            .map(|entry| entry.product.clone())
            .collect::<Vec<_>>();

        tracing::debug!(keyword, hits = results.len(), "catalog search");
        SearchOutcome {
            results,
            is_searching,
        }
    }
}

/// One-shot search without keeping an index around.
pub fn search(products: &[Product], keyword: &str) -> Vec<Product> {
    SearchIndex::build(products).search(keyword).results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Trail Running Shoe", 120.0)
                .with_category("footwear")
                .with_tags(["outdoor", "Gore-Tex"]),
            Product::new("2", "Canvas Tote", 25.0)
                .with_category("bags")
                .with_description("Roomy enough for a laptop and lunch"),
            Product::new("3", "Wool Beanie", 18.0).with_category("accessories"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let products = catalog();
        assert_eq!(ids(&search(&products, "RUNNING")), vec!["1"]);
        assert_eq!(ids(&search(&products, "laptop")), vec!["2"]);
        assert_eq!(ids(&search(&products, "accessor")), vec!["3"]);
        assert_eq!(ids(&search(&products, "gore-tex")), vec!["1"]);
    }

    #[test]
    fn a_keyword_hitting_several_products_returns_each_once() {
        let products = catalog();
        // "o" appears in several fields of product 1; it must not be duplicated.
        let hits = search(&products, "o");
        assert_eq!(ids(&hits), vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_keyword_is_not_searching() {
        let products = catalog();
        let outcome = SearchIndex::build(&products).search("");
        assert!(outcome.results.is_empty());
        assert!(!outcome.is_searching);
    }

    #[test]
    fn whitespace_keyword_searches_but_matches_nothing() {
        let products = catalog();
        let outcome = SearchIndex::build(&products).search("   ");
        assert!(outcome.results.is_empty());
        assert!(outcome.is_searching);
    }

    #[test]
    fn no_match_is_an_active_search_with_no_results() {
        let products = catalog();
        let outcome = SearchIndex::build(&products).search("kayak");
        assert!(outcome.results.is_empty());
        assert!(outcome.is_searching);
    }

    #[test]
    fn keyword_is_trimmed_before_matching() {
        let products = catalog();
        assert_eq!(ids(&search(&products, "  tote ")), vec!["2"]);
    }

    #[test]
    fn missing_description_is_skipped() {
        let products = catalog();
        let index = SearchIndex::build(&products);
        assert_eq!(index.len(), 3);
        assert!(index.search("lunch").results.iter().all(|p| p.description.is_some()));
    }
}
