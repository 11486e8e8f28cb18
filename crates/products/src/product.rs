use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

/// Queryable product read model (catalog projection).
///
/// Field names follow the provider's JSON (camelCase). Collections and optional
/// fields default when absent so partially populated records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// Average review score, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Listed unit price in major currency units.
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    /// Optional markdown as a percentage (0 to 100) off `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Minimal product: everything but id, name and price left at defaults.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            images: Vec::new(),
            category: String::new(),
            tags: BTreeSet::new(),
            colors: Vec::new(),
            rating: 0.0,
            price,
            stock: 0,
            discount: None,
            description: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price after the product's own discount, if any.
    pub fn effective_price(&self) -> f64 {
        match self.discount {
            Some(pct) => self.price * (1.0 - pct / 100.0),
            None => self.price,
        }
    }

    /// Check the shape a persisted or provider-supplied record must have.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a non-negative amount (got {})",
                self.price
            )));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DomainError::validation(format!(
                "rating must be within 0..=5 (got {})",
                self.rating
            )));
        }
        if let Some(pct) = self.discount {
            if !(0.0..=100.0).contains(&pct) {
                return Err(DomainError::validation(format!(
                    "discount must be within 0..=100 (got {pct})"
                )));
            }
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_json_with_defaults() {
        let json = r#"{"id": 7, "name": "Linen Shirt", "price": 39.5, "stock": 3,
                       "tags": ["summer", "linen"], "discount": 10}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::from(7u64));
        assert_eq!(product.category, "");
        assert!(product.tags.contains("linen"));
        assert!(product.colors.is_empty());
        assert_eq!(product.discount, Some(10.0));
        assert!(product.description.is_none());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn effective_price_applies_discount() {
        let p = Product::new("1", "Mug", 20.0).with_discount(25.0);
        assert!((p.effective_price() - 15.0).abs() < 1e-9);
        assert_eq!(Product::new("2", "Cup", 8.0).effective_price(), 8.0);
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let base = Product::new("1", "Lamp", 10.0);

        let negative = Product { price: -1.0, ..base.clone() };
        assert!(matches!(negative.validate(), Err(DomainError::Validation(_))));

        let nan = Product { price: f64::NAN, ..base.clone() };
        assert!(nan.validate().is_err());

        let rating = base.clone().with_rating(5.5);
        assert!(rating.validate().is_err());

        let discount = base.clone().with_discount(120.0);
        assert!(discount.validate().is_err());

        let blank = Product { name: "  ".to_string(), ..base.clone() };
        assert!(blank.validate().is_err());

        let no_id = Product { id: ProductId::new(""), ..base };
        assert!(matches!(no_id.validate(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn stock_drives_availability() {
        assert!(!Product::new("1", "Rug", 99.0).is_in_stock());
        assert!(Product::new("1", "Rug", 99.0).with_stock(1).is_in_stock());
    }
}
