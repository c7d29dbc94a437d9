use std::sync::RwLock;

use serde_json::Value as JsonValue;

use stockroom_catalog::{CategoriesSnapshot, ProductsSnapshot};

use super::r#trait::{LoadedSnapshot, SnapshotError, SnapshotStore};

#[derive(Debug, Default)]
struct Slots {
    products: Option<JsonValue>,
    categories: Option<JsonValue>,
    product_saves: usize,
    category_saves: usize,
}

/// In-memory snapshot store.
///
/// Keeps the last saved JSON of each resource so tests can inspect exactly
/// what would have been written. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<Slots>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store as if both resources had been written before.
    pub fn with_snapshot(
        products: &ProductsSnapshot,
        categories: &CategoriesSnapshot,
    ) -> Result<Self, SnapshotError> {
        let store = Self::new();
        {
            let mut slots = store.inner.write().unwrap_or_else(|e| e.into_inner());
            slots.products = Some(serde_json::to_value(products).map_err(SnapshotError::Serialize)?);
            slots.categories =
                Some(serde_json::to_value(categories).map_err(SnapshotError::Serialize)?);
        }
        Ok(store)
    }

    pub fn products_json(&self) -> Option<JsonValue> {
        self.read().products.clone()
    }

    pub fn categories_json(&self) -> Option<JsonValue> {
        self.read().categories.clone()
    }

    /// Number of (product saves, category saves) so far.
    pub fn save_counts(&self) -> (usize, usize) {
        let slots = self.read();
        (slots.product_saves, slots.category_saves)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Slots> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<LoadedSnapshot, SnapshotError> {
        let slots = self.read();
        let products = match &slots.products {
            Some(v) => serde_json::from_value(v.clone()).map_err(|source| {
                SnapshotError::Deserialize {
                    path: "memory://products".into(),
                    source,
                }
            })?,
            None => ProductsSnapshot::default(),
        };
        let categories = match &slots.categories {
            Some(v) => serde_json::from_value(v.clone()).map_err(|source| {
                SnapshotError::Deserialize {
                    path: "memory://categories".into(),
                    source,
                }
            })?,
            None => CategoriesSnapshot::default(),
        };
        Ok(LoadedSnapshot {
            products,
            categories,
        })
    }

    fn save_products(&self, snapshot: &ProductsSnapshot) -> Result<(), SnapshotError> {
        let value = serde_json::to_value(snapshot).map_err(SnapshotError::Serialize)?;
        let mut slots = self.inner.write().unwrap_or_else(|e| e.into_inner());
        slots.products = Some(value);
        slots.product_saves += 1;
        Ok(())
    }

    fn save_categories(&self, snapshot: &CategoriesSnapshot) -> Result<(), SnapshotError> {
        let value = serde_json::to_value(snapshot).map_err(SnapshotError::Serialize)?;
        let mut slots = self.inner.write().unwrap_or_else(|e| e.into_inner());
        slots.categories = Some(value);
        slots.category_saves += 1;
        Ok(())
    }
}
