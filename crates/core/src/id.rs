//! Strongly-typed identifiers used across the catalog.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Identifier of a product as issued by the catalog provider.
///
/// Providers hand out either numeric ids (`42`) or opaque strings (`"sku-9f3"`);
/// both are kept as text. Ordering is "natural": numeric ids compare by value and
/// sort before non-numeric ones, which compare lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Build an id without validation. Use `str::parse` for untrusted input.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Ord for ProductId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            // Tie-break on the raw text so "007" and "7" stay distinct.
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ProductId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Number(u64),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawProductId::deserialize(deserializer)? {
            RawProductId::Text(s) => Ok(Self(s)),
            RawProductId::Number(n) => Ok(Self::from(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank_ids() {
        assert!(matches!("  ".parse::<ProductId>(), Err(DomainError::InvalidId(_))));
        assert_eq!("  17 ".parse::<ProductId>().unwrap(), ProductId::new("17"));
    }

    #[test]
    fn numeric_ids_order_by_value() {
        let mut ids = vec![
            ProductId::from(10u64),
            ProductId::from(9u64),
            ProductId::new("abc"),
            ProductId::from(100u64),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                ProductId::from(9u64),
                ProductId::from(10u64),
                ProductId::from(100u64),
                ProductId::new("abc"),
            ]
        );
    }

    #[test]
    fn leading_zeros_stay_distinct() {
        let a = ProductId::new("007");
        let b = ProductId::new("7");
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let ids: Vec<ProductId> = serde_json::from_str(r#"[12, "x-1"]"#).unwrap();
        assert_eq!(ids, vec![ProductId::from(12u64), ProductId::new("x-1")]);
        assert_eq!(serde_json::to_string(&ids[0]).unwrap(), r#""12""#);
    }

    #[test]
    fn rejects_non_scalar_json() {
        assert!(serde_json::from_str::<ProductId>("{}").is_err());
        assert!(serde_json::from_str::<ProductId>("-3").is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the natural ordering agrees with equality.
            #[test]
            fn ordering_is_consistent_with_eq(a in "[0-9a-c]{1,4}", b in "[0-9a-c]{1,4}") {
                let (x, y) = (ProductId::new(a.clone()), ProductId::new(b.clone()));
                prop_assert_eq!(x.cmp(&y) == Ordering::Equal, x == y);
                prop_assert_eq!(x.cmp(&y), y.cmp(&x).reverse());
            }
        }
    }
}
