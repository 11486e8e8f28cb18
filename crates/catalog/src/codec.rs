//! Query string <-> `Filter` mapping.
//!
//! Decoding is fail-open: anything unrecognised, garbled or half-present is
//! dropped and the affected dimension is left unconstrained. Nothing here
//! returns an error.

use std::collections::HashMap;

use url::form_urlencoded;

use crate::filter::{CategoryFilter, Filter, PriceRange, RatingRange, SortKey};

/// Query string vocabulary.
pub mod keys {
    pub const SEARCH: &str = "search";
    pub const KEYWORD: &str = "keyword";
    pub const CATEGORY: &str = "category";
    pub const MIN_PRICE: &str = "minPrice";
    pub const MAX_PRICE: &str = "maxPrice";
    pub const COLORS: &str = "colors";
    pub const MIN_RATING: &str = "minRating";
    pub const MAX_RATING: &str = "maxRating";
    pub const IN_STOCK: &str = "inStock";
    pub const SORT_BY: &str = "sortBy";
}

/// Bidirectional mapping between a URL query string and a [`Filter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCodec;

impl FilterCodec {
    /// Parse a query string (with or without the leading `?`).
    ///
    /// - `search` wins over its alias `keyword`; blank text is ignored, so a
    ///   blank `search` falls through to `keyword`.
    /// - `category` and `colors` take comma-separated lists. One category
    ///   collapses to a scalar, colors always stay a list.
    /// - `minPrice`/`maxPrice` and `minRating`/`maxRating` are kept only when
    ///   both halves are present and parse to finite numbers.
    /// - `inStock` is `true` only for the literal `"true"`.
    /// - `sortBy` outside the known keys is ignored.
    ///
    /// When a key repeats, its first occurrence is used.
    pub fn decode(query: &str) -> Filter {
        let query = query.trim().trim_start_matches('?');
        let mut params: HashMap<String, String> = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }

        let mut filter = Filter::new();

        let search = [keys::SEARCH, keys::KEYWORD]
            .into_iter()
            .filter_map(|key| params.get(key))
            .find(|s| !s.trim().is_empty());
        if let Some(search) = search {
            filter = filter.with_search(search.clone());
        }

        if let Some(category) = params
            .get(keys::CATEGORY)
            .and_then(|raw| CategoryFilter::from_values(vec![raw.clone()]))
        {
            filter = filter.with_category(category);
        }

        if let Some((min, max)) = number_pair(&params, keys::MIN_PRICE, keys::MAX_PRICE) {
            filter = filter.with_price_range(PriceRange::new(min, max));
        }

        if let Some(raw) = params.get(keys::COLORS) {
            filter = filter.with_colors([raw]);
        }

        if let Some((min, max)) = number_pair(&params, keys::MIN_RATING, keys::MAX_RATING) {
            filter = filter.with_rating_range(RatingRange::new(min, max));
        }

        if let Some(raw) = params.get(keys::IN_STOCK) {
            filter = filter.with_in_stock(raw == "true");
        }

        match params.get(keys::SORT_BY).map(|raw| raw.parse::<SortKey>()) {
            Some(Ok(key)) => filter = filter.with_sort_by(key),
            Some(Err(err)) => tracing::debug!(%err, "ignoring sortBy"),
            None => {}
        }

        filter
    }

    /// Render a filter back into a query string (no leading `?`).
    ///
    /// Every field `decode` understands survives a round trip. The `Filter`
    /// builders normalise list entries and blank text the way `decode` does.
    pub fn encode(filter: &Filter) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());

        if let Some(search) = filter.search() {
            out.append_pair(keys::SEARCH, search);
        }
        if let Some(category) = filter.category() {
            out.append_pair(keys::CATEGORY, &category.values().join(","));
        }
        if let Some(range) = filter.price_range() {
            out.append_pair(keys::MIN_PRICE, &range.min.to_string());
            out.append_pair(keys::MAX_PRICE, &range.max.to_string());
        }
        if let Some(colors) = filter.colors() {
            out.append_pair(keys::COLORS, &colors.join(","));
        }
        if let Some(range) = filter.rating_range() {
            out.append_pair(keys::MIN_RATING, &range.min.to_string());
            out.append_pair(keys::MAX_RATING, &range.max.to_string());
        }
        if let Some(in_stock) = filter.in_stock() {
            out.append_pair(keys::IN_STOCK, if in_stock { "true" } else { "false" });
        }
        if let Some(key) = filter.sort_by() {
            out.append_pair(keys::SORT_BY, key.as_str());
        }

        out.finish()
    }

    /// Shallow override of `base` by the fields present in `overrides`.
    pub fn merge(base: &Filter, overrides: &Filter) -> Filter {
        base.merge(overrides)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn number_pair(params: &HashMap<String, String>, min: &str, max: &str) -> Option<(f64, f64)> {
    let min = parse_number(params.get(min)?)?;
    let max = parse_number(params.get(max)?)?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_vocabulary() {
        let filter = FilterCodec::decode(
            "?search=rain%20jacket&category=outerwear,shoes&minPrice=10&maxPrice=99.5\
             &colors=navy&minRating=3&maxRating=5&inStock=true&sortBy=priceDesc",
        );

        assert_eq!(filter.search(), Some("rain jacket"));
        assert_eq!(
            filter.category(),
            Some(&CategoryFilter::Many(vec!["outerwear".into(), "shoes".into()]))
        );
        assert_eq!(filter.price_range(), Some(PriceRange::new(10.0, 99.5)));
        assert_eq!(filter.colors(), Some(&["navy".to_string()][..]));
        assert_eq!(filter.rating_range(), Some(RatingRange::new(3.0, 5.0)));
        assert_eq!(filter.in_stock(), Some(true));
        assert_eq!(filter.sort_by(), Some(SortKey::PriceDesc));
    }

    #[test]
    fn half_a_price_pair_sets_no_range() {
        let filter = FilterCodec::decode("?minPrice=10");
        assert_eq!(filter.price_range(), None);
        assert!(filter.is_empty());
    }

    #[test]
    fn garbled_pairs_are_dropped_not_errors() {
        let filter = FilterCodec::decode("minPrice=ten&maxPrice=20&minRating=1&maxRating=NaN");
        assert_eq!(filter.price_range(), None);
        assert_eq!(filter.rating_range(), None);

        let filter = FilterCodec::decode("minPrice=inf&maxPrice=20");
        assert_eq!(filter.price_range(), None);
    }

    #[test]
    fn keyword_is_an_alias_for_search() {
        assert_eq!(FilterCodec::decode("keyword=lamp").search(), Some("lamp"));
        assert_eq!(FilterCodec::decode("keyword=lamp&search=desk").search(), Some("desk"));
        assert_eq!(FilterCodec::decode("search=%20%20").search(), None);
        assert_eq!(FilterCodec::decode("search=&keyword=lamp").search(), Some("lamp"));
        assert_eq!(FilterCodec::decode("search=+&keyword=").search(), None);
    }

    #[test]
    fn builder_edge_shapes_survive_a_round_trip() {
        let filters = [
            Filter::new().with_colors(Vec::<String>::new()),
            Filter::new().with_category(CategoryFilter::Many(vec!["shoes".into()])),
            Filter::new().with_search(" "),
            Filter::new().with_colors([" a", "a,b"]),
            Filter::new().with_search(" lamp "),
        ];
        for filter in filters {
            assert_eq!(FilterCodec::decode(&FilterCodec::encode(&filter)), filter);
        }
    }

    #[test]
    fn single_category_collapses_but_single_color_stays_a_list() {
        let filter = FilterCodec::decode("category=shoes&colors=red");
        assert_eq!(filter.category(), Some(&CategoryFilter::One("shoes".into())));
        assert_eq!(filter.colors(), Some(&["red".to_string()][..]));
    }

    #[test]
    fn empty_list_entries_are_skipped() {
        let filter = FilterCodec::decode("category=,shoes,&colors=,,");
        assert_eq!(filter.category(), Some(&CategoryFilter::One("shoes".into())));
        assert_eq!(filter.colors(), None);
    }

    #[test]
    fn in_stock_is_true_only_for_literal_true() {
        assert_eq!(FilterCodec::decode("inStock=true").in_stock(), Some(true));
        assert_eq!(FilterCodec::decode("inStock=yes").in_stock(), Some(false));
        assert_eq!(FilterCodec::decode("").in_stock(), None);
    }

    #[test]
    fn unknown_keys_and_sort_values_are_ignored() {
        let filter = FilterCodec::decode("page=3&sortBy=cheapest&utm_source=mail");
        assert!(filter.is_empty());
    }

    #[test]
    fn first_occurrence_of_repeated_key_wins() {
        let filter = FilterCodec::decode("sortBy=popularity&sortBy=priceAsc");
        assert_eq!(filter.sort_by(), Some(SortKey::Popularity));
    }

    #[test]
    fn encode_omits_absent_fields() {
        assert_eq!(FilterCodec::encode(&Filter::new()), "");
        let encoded = FilterCodec::encode(&Filter::new().with_sort_by(SortKey::Newest));
        assert_eq!(encoded, "sortBy=newest");
    }

    #[test]
    fn merge_delegates_to_filter() {
        let base = FilterCodec::decode("category=shoes&sortBy=newest");
        let merged = FilterCodec::merge(&base, &FilterCodec::decode("sortBy=priceAsc"));
        assert_eq!(merged.category(), Some(&CategoryFilter::One("shoes".into())));
        assert_eq!(merged.sort_by(), Some(SortKey::PriceAsc));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn word() -> impl Strategy<Value = String> {
            "[a-z][a-z &+=%-]{0,10}[a-z]"
        }

        /// Free text including blanks, padding and embedded commas.
        fn text() -> impl Strategy<Value = String> {
            "[ ,a-z&+=%-]{0,12}"
        }

        fn number() -> impl Strategy<Value = f64> {
            prop_oneof![
                (-1_000_000.0f64..1_000_000.0),
                (0u32..10_000).prop_map(|n| n as f64 / 100.0),
            ]
        }

        fn filter() -> impl Strategy<Value = Filter> {
            (
                proptest::option::of(prop_oneof![word(), text()]),
                proptest::option::of(proptest::collection::vec(prop_oneof![word(), text()], 0..4)),
                proptest::option::of((number(), number())),
                proptest::option::of(proptest::collection::vec(prop_oneof![word(), text()], 0..4)),
                proptest::option::of((number(), number())),
                proptest::option::of(any::<bool>()),
                proptest::option::of(proptest::sample::select(SortKey::ALL.to_vec())),
            )
                .prop_map(|(search, categories, price, colors, rating, in_stock, sort)| {
                    let mut f = Filter::new();
                    if let Some(s) = search {
                        f = f.with_search(s);
                    }
                    if let Some(c) = categories {
                        f = f.with_category(CategoryFilter::Many(c));
                    }
                    if let Some((min, max)) = price {
                        f = f.with_price_range(PriceRange::new(min, max));
                    }
                    if let Some(c) = colors {
                        f = f.with_colors(c);
                    }
                    if let Some((min, max)) = rating {
                        f = f.with_rating_range(RatingRange::new(min, max));
                    }
                    if let Some(b) = in_stock {
                        f = f.with_in_stock(b);
                    }
                    if let Some(k) = sort {
                        f = f.with_sort_by(k);
                    }
                    f
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: decode(encode(f)) == f for recognised fields.
            #[test]
            fn encode_then_decode_is_identity(f in filter()) {
                let encoded = FilterCodec::encode(&f);
                prop_assert_eq!(FilterCodec::decode(&encoded), f);
            }

            /// Property: decode never panics on arbitrary input.
            #[test]
            fn decode_is_total(raw in ".{0,64}") {
                let _ = FilterCodec::decode(&raw);
            }
        }
    }
}
