//! Catalog error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the catalog layer.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Broad classification of a [`CatalogError`], used by adapters to pick a
/// response shape without matching every variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InsufficientStock,
    Validation,
}

/// Catalog-level error.
///
/// Every rejected operation maps to exactly one variant; nothing here is
/// an infrastructure failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No product with the given id.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// No category with the given name.
    #[error("category {0} not found")]
    CategoryNotFound(String),

    /// A product with this id is already registered.
    #[error("product {0} is already registered as a product")]
    DuplicateProduct(ProductId),

    /// The category name is already taken.
    #[error("{0} is already a category")]
    CategoryExists(String),

    /// Only empty categories can be removed.
    #[error("the {category} category still holds {products} product(s)")]
    CategoryNotEmpty { category: String, products: usize },

    /// A negative stock change larger than the stock on hand.
    #[error(
        "cannot update stock of {title} as you tried to remove {requested} but there are only {available} remaining"
    )]
    InsufficientStock {
        title: String,
        available: u64,
        requested: u64,
    },

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProductNotFound(_) | Self::CategoryNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateProduct(_) | Self::CategoryExists(_) | Self::CategoryNotEmpty { .. } => {
                ErrorKind::Conflict
            }
            Self::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_variants() {
        assert_eq!(
            CatalogError::ProductNotFound(ProductId::new("p1")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CatalogError::CategoryNotFound("yarn".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CatalogError::CategoryNotEmpty {
                category: "yarn".into(),
                products: 2
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CatalogError::validation("bad").kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn insufficient_stock_message_names_product_and_stock() {
        let err = CatalogError::InsufficientStock {
            title: "Yellow yarn".into(),
            available: 2,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "cannot update stock of Yellow yarn as you tried to remove 10 but there are only 2 remaining"
        );
    }
}
