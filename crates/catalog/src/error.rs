use thiserror::Error;

/// Failures surfaced by a catalog provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed catalog data: {0}")]
    Malformed(String),
}
