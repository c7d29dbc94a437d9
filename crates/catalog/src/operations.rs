//! Catalog mutations.
//!
//! Each method either applies its change to both structures or leaves the
//! catalog untouched and returns the reason.

use stockroom_core::{CatalogError, CatalogResult, ProductId};

use crate::product::Product;
use crate::store::Catalog;

/// Outcome of a successful stock update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    pub product_id: ProductId,
    pub title: String,
    pub previous: u64,
    pub stock: u64,
}

impl Catalog {
    /// Register `product` and file it under its category, creating the
    /// category on first use.
    pub fn add_product(&mut self, product: Product) -> CatalogResult<&Product> {
        if self.contains_product(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        self.categories
            .entry(product.category.clone())
            .or_default()
            .push(product.id.clone());
        self.products.push(product);

        let last = self.products.len() - 1;
        Ok(&self.products[last])
    }

    /// Apply a signed stock change. Removing more than is on hand is rejected
    /// without touching the product.
    pub fn update_product_stock(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> CatalogResult<StockChange> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))?;
        let product = &mut self.products[idx];
        let previous = product.stock;

        let stock = if delta < 0 {
            let requested = delta.unsigned_abs();
            previous
                .checked_sub(requested)
                .ok_or_else(|| CatalogError::InsufficientStock {
                    title: product.title.clone(),
                    available: previous,
                    requested,
                })?
        } else {
            previous
                .checked_add(delta.unsigned_abs())
                .ok_or_else(|| CatalogError::validation("stock change overflows stock counter"))?
        };

        product.stock = stock;
        Ok(StockChange {
            product_id: product.id.clone(),
            title: product.title.clone(),
            previous,
            stock,
        })
    }

    /// Remove a product from the table and from its category. The category
    /// itself stays, even when it becomes empty.
    pub fn remove_product(&mut self, id: &ProductId) -> CatalogResult<Product> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))?;
        let removed = self.products.remove(idx);

        if let Some(ids) = self.categories.get_mut(&removed.category) {
            if let Some(pos) = ids.iter().position(|listed| listed == &removed.id) {
                ids.remove(pos);
            }
        }

        Ok(removed)
    }

    /// Create an empty category.
    pub fn add_category(&mut self, name: &str) -> CatalogResult<()> {
        if name.trim().is_empty() {
            return Err(CatalogError::validation("category cannot be empty"));
        }
        if self.contains_category(name) {
            return Err(CatalogError::CategoryExists(name.to_string()));
        }
        self.categories.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Delete a category; only empty categories can go.
    pub fn remove_category(&mut self, name: &str) -> CatalogResult<()> {
        let ids = self
            .categories
            .get(name)
            .ok_or_else(|| CatalogError::CategoryNotFound(name.to_string()))?;

        if !ids.is_empty() {
            return Err(CatalogError::CategoryNotEmpty {
                category: name.to_string(),
                products: ids.len(),
            });
        }

        self.categories.shift_remove(name);
        Ok(())
    }
}
