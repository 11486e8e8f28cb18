//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Catalog filters follow this rule: every refinement produces
/// a fresh `Filter` instead of mutating the current one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct PriceRange { min: f64, max: f64 }
///
/// impl ValueObject for PriceRange {}
///
/// assert_eq!(PriceRange { min: 1.0, max: 2.0 }, PriceRange { min: 1.0, max: 2.0 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
