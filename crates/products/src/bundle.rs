//! Multi-product bundles and their derived pricing.
//!
//! Totals are always computed from the member products at call time and never
//! stored on the bundle, so a provider-side price change is reflected on the
//! next `price` call.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

use crate::product::Product;

/// Smallest group `Bundle::try_new` accepts.
pub const MIN_BUNDLE_SIZE: usize = 3;

/// A fixed group of products sold together at a percentage off their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub products: Vec<Product>,
    /// Percentage (0 to 100) taken off the original total.
    pub discount_percentage: f64,
}

impl Bundle {
    /// Build a bundle without checking it. Pricing still works on any group;
    /// callers that accept bundles from outside should use [`Bundle::try_new`].
    pub fn new(name: impl Into<String>, products: Vec<Product>, discount_percentage: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            products,
            discount_percentage,
        }
    }

    /// Build a bundle, enforcing the construction rules (at least
    /// [`MIN_BUNDLE_SIZE`] products, discount within 0..=100).
    pub fn try_new(
        name: impl Into<String>,
        products: Vec<Product>,
        discount_percentage: f64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("bundle name cannot be empty"));
        }
        if products.len() < MIN_BUNDLE_SIZE {
            return Err(DomainError::validation(format!(
                "a bundle needs at least {MIN_BUNDLE_SIZE} products (got {})",
                products.len()
            )));
        }
        if !(0.0..=100.0).contains(&discount_percentage) {
            return Err(DomainError::invariant(format!(
                "bundle discount must be within 0..=100 (got {discount_percentage})"
            )));
        }
        Ok(Self::new(name, products, discount_percentage))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Convenience for `BundlePricingCalculator::price(self)`.
    pub fn pricing(&self) -> BundlePricing {
        BundlePricingCalculator::price(self)
    }
}

/// Derived totals for a bundle. Unrounded; formatting is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BundlePricing {
    pub original: f64,
    pub discounted: f64,
    pub savings: f64,
}

/// Pure pricing rules for bundles.
///
/// The discount percentage is not validated here. For a percentage inside
/// 0..=100, `discounted <= original` holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundlePricingCalculator;

impl BundlePricingCalculator {
    pub fn price(bundle: &Bundle) -> BundlePricing {
        Self::price_products(&bundle.products, bundle.discount_percentage)
    }

    pub fn price_products(products: &[Product], discount_percentage: f64) -> BundlePricing {
        let original: f64 = products.iter().map(|p| p.price).sum();
        let discounted = original * (1.0 - discount_percentage / 100.0);
        BundlePricing {
            original,
            discounted,
            savings: original - discounted,
        }
    }
}
