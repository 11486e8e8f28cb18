//! Structured catalog constraints.
//!
//! A `Filter` is a value object: it is built once per query and replaced, never
//! edited, when the shopper refines their selection. Every dimension is optional
//! and an absent dimension places no constraint on the result.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, ValueObject};
use storefront_products::Product;

/// Category constraint.
///
/// A single requested category is kept as a scalar, several as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryFilter {
    One(String),
    Many(Vec<String>),
}

impl CategoryFilter {
    /// Build from a list of values: empty yields `None`, one value collapses to
    /// `One`, anything longer stays `Many`.
    ///
    /// Entries are split on commas and trimmed, and blank entries are dropped,
    /// the same way a query string list is read.
    pub fn from_values(values: Vec<String>) -> Option<Self> {
        let mut values = list_entries(values);
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::One),
            _ => Some(Self::Many(values)),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => core::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Any-of match, ignoring ASCII case.
    pub fn matches(&self, category: &str) -> bool {
        self.values().iter().any(|c| c.eq_ignore_ascii_case(category))
    }
}

/// Comma-separated list normalisation shared by the builders and the codec.
pub(crate) fn list_entries<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Inclusive `[min, max]` price constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Inclusive `[min, max]` rating constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl RatingRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, rating: f64) -> bool {
        self.min <= rating && rating <= self.max
    }
}

/// Orderings the catalog can be presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Newest first. Products carry no timestamp, so this is a proxy: highest id
    /// first, on the assumption that providers issue ids in creation order.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    /// Highest rating first.
    Popularity,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Popularity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "priceAsc",
            SortKey::PriceDesc => "priceDesc",
            SortKey::Popularity => "popularity",
        }
    }

    /// Lenient parse: unknown names fall back to [`SortKey::Newest`].
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown sort key: {s}")))
    }
}

/// Catalog-narrowing constraints decoded from a query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<CategoryFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rating_range: Option<RatingRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort_by: Option<SortKey>,
}

impl ValueObject for Filter {}
impl ValueObject for PriceRange {}
impl ValueObject for RatingRange {}
impl ValueObject for CategoryFilter {}

impl Filter {
    /// A filter with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank text clears the search.
    pub fn with_search(self, search: impl Into<String>) -> Self {
        let search = search.into();
        Self {
            search: (!search.trim().is_empty()).then_some(search),
            ..self
        }
    }

    /// Stored in its normalised shape: a single value becomes
    /// [`CategoryFilter::One`] and an empty list clears the constraint.
    pub fn with_category(self, category: CategoryFilter) -> Self {
        let category = match category {
            CategoryFilter::One(value) => CategoryFilter::from_values(vec![value]),
            CategoryFilter::Many(values) => CategoryFilter::from_values(values),
        };
        Self { category, ..self }
    }

    /// A range with a non-finite bound clears the constraint.
    pub fn with_price_range(self, range: PriceRange) -> Self {
        Self {
            price_range: (range.min.is_finite() && range.max.is_finite()).then_some(range),
            ..self
        }
    }

    /// Entries are split on commas and trimmed; nothing left clears the
    /// constraint.
    pub fn with_colors<I, S>(self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = list_entries(colors);
        Self {
            colors: (!colors.is_empty()).then_some(colors),
            ..self
        }
    }

    /// A range with a non-finite bound clears the constraint.
    pub fn with_rating_range(self, range: RatingRange) -> Self {
        Self {
            rating_range: (range.min.is_finite() && range.max.is_finite()).then_some(range),
            ..self
        }
    }

    pub fn with_in_stock(self, in_stock: bool) -> Self {
        Self {
            in_stock: Some(in_stock),
            ..self
        }
    }

    pub fn with_sort_by(self, key: SortKey) -> Self {
        Self {
            sort_by: Some(key),
            ..self
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<&CategoryFilter> {
        self.category.as_ref()
    }

    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    pub fn colors(&self) -> Option<&[String]> {
        self.colors.as_deref()
    }

    pub fn rating_range(&self) -> Option<RatingRange> {
        self.rating_range
    }

    pub fn in_stock(&self) -> Option<bool> {
        self.in_stock
    }

    pub fn sort_by(&self) -> Option<SortKey> {
        self.sort_by
    }

    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Field-wise override: every field set in `overrides` wins, every other
    /// field keeps `self`'s value.
    pub fn merge(&self, overrides: &Filter) -> Filter {
        Filter {
            search: overrides.search.clone().or_else(|| self.search.clone()),
            category: overrides.category.clone().or_else(|| self.category.clone()),
            price_range: overrides.price_range.or(self.price_range),
            colors: overrides.colors.clone().or_else(|| self.colors.clone()),
            rating_range: overrides.rating_range.or(self.rating_range),
            in_stock: overrides.in_stock.or(self.in_stock),
            sort_by: overrides.sort_by.or(self.sort_by),
        }
    }

    /// Client-side check of the structural dimensions.
    ///
    /// Search text is not considered here (see `SearchIndex`), and
    /// `in_stock = false` means "don't care" rather than "out of stock only".
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !category.matches(&product.category) {
                return false;
            }
        }
        if let Some(range) = self.price_range {
            if !range.contains(product.price) {
                return false;
            }
        }
        if let Some(colors) = &self.colors {
            let any = colors
                .iter()
                .any(|want| product.colors.iter().any(|have| have.eq_ignore_ascii_case(want)));
            if !any {
                return false;
            }
        }
        if let Some(range) = self.rating_range {
            if !range.contains(product.rating) {
                return false;
            }
        }
        if self.in_stock == Some(true) && !product.is_in_stock() {
            return false;
        }
        true
    }
}
