use serde::{Deserialize, Deserializer, Serialize};

use stockroom_core::{CatalogError, CatalogResult, ProductId};

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// A catalog product, as stored and as served.
///
/// Older snapshot files may omit `description`/`image` and carry `null` for
/// numbers that were never supplied; those load as empty text and zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Product fields supplied by a caller; the id is assigned on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
    pub stock: u64,
}

impl NewProduct {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::validation("title cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(CatalogError::validation("category cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::validation(
                "price must be a non-negative number",
            ));
        }
        if !self.rating.rate.is_finite() {
            return Err(CatalogError::validation("rate must be a finite number"));
        }
        Ok(())
    }

    /// Validate and attach `id`.
    pub fn into_product(self, id: ProductId) -> CatalogResult<Product> {
        self.validate()?;
        Ok(Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            rating: self.rating,
            stock: self.stock,
        })
    }
}
