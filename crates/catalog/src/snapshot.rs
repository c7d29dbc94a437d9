//! Serializable snapshot shapes.
//!
//! These mirror the two persisted resources: the full product list, and the
//! category registry with every product record inlined under its category.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// `{"products": [...]}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductsSnapshot {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// `{"categories": {"name": [...]}}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoriesSnapshot {
    #[serde(default)]
    pub categories: IndexMap<String, Vec<Product>>,
}
