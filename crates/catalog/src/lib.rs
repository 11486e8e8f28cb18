//! `storefront-catalog`: turns a query string into an ordered product view.
//!
//! Everything here is a pure function of its inputs: filters are decoded,
//! products narrowed and sorted, but nothing is retained between calls.

pub mod browse;
pub mod codec;
pub mod error;
pub mod filter;
pub mod provider;
pub mod search;
pub mod sort;

pub use browse::{CatalogView, browse, browse_filter};
pub use codec::FilterCodec;
pub use error::CatalogError;
pub use filter::{CategoryFilter, Filter, PriceRange, RatingRange, SortKey};
pub use provider::{CatalogPage, CatalogProvider, InMemoryCatalog, Pagination};
pub use search::{SearchIndex, SearchOutcome, search};
pub use sort::SortPolicy;
