//! Products domain module (read side).
//!
//! Products arrive from the catalog provider as read-only projections; this crate
//! only describes their shape and the pure pricing rules built on top of them
//! (no IO, no storage).

pub mod bundle;
pub mod product;

pub use bundle::{Bundle, BundlePricing, BundlePricingCalculator, MIN_BUNDLE_SIZE};
pub use product::Product;
