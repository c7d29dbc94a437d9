//! Catalog service: the single mutation path for a running process.
//!
//! ```text
//! request
//!   ↓
//! 1. lock the catalog
//!   ↓
//! 2. run the catalog operation (pure, all-or-nothing)
//!   ↓
//! 3. on success, write the affected snapshots (still under the lock)
//!   ↓
//! 4. unlock, return owned results
//! ```
//!
//! Product operations rewrite both snapshots (categories inline product
//! records). Category operations rewrite only the category snapshot.
//!
//! A failed write is returned as [`ServiceError::Persistence`]. The in-memory
//! change is kept; the next successful write (or [`CatalogService::flush`])
//! carries it to storage.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use stockroom_catalog::{Catalog, NewProduct, Product, StockChange};
use stockroom_core::{CatalogError, ErrorKind, IdGenerator, ProductId, UuidIdGenerator};

use crate::snapshot::{SnapshotError, SnapshotStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to persist catalog snapshot: {0}")]
    Persistence(#[from] SnapshotError),
}

impl ServiceError {
    /// Catalog error kind, or `None` for persistence failures.
    pub fn catalog_kind(&self) -> Option<ErrorKind> {
        match self {
            ServiceError::Catalog(e) => Some(e.kind()),
            ServiceError::Persistence(_) => None,
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum Touched {
    Products,
    Categories,
}

pub struct CatalogService<S> {
    catalog: Mutex<Catalog>,
    store: S,
    ids: Arc<dyn IdGenerator>,
}

impl<S> std::fmt::Debug for CatalogService<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<S> CatalogService<S>
where
    S: SnapshotStore,
{
    /// Load both snapshots from `store` and reconcile them into a catalog.
    pub fn open(store: S) -> Result<Self, SnapshotError> {
        Self::open_with_ids(store, Arc::new(UuidIdGenerator))
    }

    pub fn open_with_ids(store: S, ids: Arc<dyn IdGenerator>) -> Result<Self, SnapshotError> {
        let loaded = store.load()?;
        let catalog = Catalog::from_snapshot(loaded.products, loaded.categories);
        tracing::info!(
            products = catalog.list_products().len(),
            categories = catalog.list_categories().len(),
            "catalog loaded"
        );
        Ok(Self {
            catalog: Mutex::new(catalog),
            store,
            ids,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, Catalog> {
        // Catalog operations never leave a half-applied change behind, so the
        // data behind a poisoned lock is still consistent.
        self.catalog.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, catalog: &Catalog, touched: Touched) -> Result<(), SnapshotError> {
        let result = match touched {
            Touched::Products => self
                .store
                .save_products(&catalog.products_snapshot())
                .and_then(|()| self.store.save_categories(&catalog.categories_snapshot())),
            Touched::Categories => self.store.save_categories(&catalog.categories_snapshot()),
        };
        if let Err(e) = &result {
            tracing::error!(error = %e, "snapshot write failed");
        }
        result
    }

    fn rejected(err: CatalogError) -> ServiceError {
        tracing::debug!(error = %err, "catalog operation rejected");
        ServiceError::Catalog(err)
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.lock().list_products().to_vec()
    }

    pub fn get_product(&self, id: &ProductId) -> Result<Product, ServiceError> {
        self.lock()
            .get_product(id)
            .cloned()
            .map_err(ServiceError::from)
    }

    pub fn list_categories(&self) -> Vec<String> {
        self.lock()
            .list_categories()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn get_products_by_category(&self, name: &str) -> Result<Vec<Product>, ServiceError> {
        let catalog = self.lock();
        let products = catalog.get_products_by_category(name)?;
        Ok(products.into_iter().cloned().collect())
    }

    /// Assign a fresh id to `new` and add it.
    pub fn create_product(&self, new: NewProduct) -> Result<Product, ServiceError> {
        let product = new.into_product(self.ids.next_id()).map_err(Self::rejected)?;
        self.insert_product(product)
    }

    // Callers go through `create_product`, which validates first.
    fn insert_product(&self, product: Product) -> Result<Product, ServiceError> {
        let mut catalog = self.lock();
        let added = catalog.add_product(product).map_err(Self::rejected)?.clone();
        tracing::info!(product_id = %added.id, category = %added.category, "product added");
        self.persist(&catalog, Touched::Products)?;
        Ok(added)
    }

    pub fn update_product_stock(
        &self,
        id: &ProductId,
        delta: i64,
    ) -> Result<StockChange, ServiceError> {
        let mut catalog = self.lock();
        let change = catalog
            .update_product_stock(id, delta)
            .map_err(Self::rejected)?;
        tracing::info!(
            product_id = %change.product_id,
            previous = change.previous,
            stock = change.stock,
            "stock updated"
        );
        self.persist(&catalog, Touched::Products)?;
        Ok(change)
    }

    pub fn remove_product(&self, id: &ProductId) -> Result<Product, ServiceError> {
        let mut catalog = self.lock();
        let removed = catalog.remove_product(id).map_err(Self::rejected)?;
        tracing::info!(product_id = %removed.id, category = %removed.category, "product removed");
        self.persist(&catalog, Touched::Products)?;
        Ok(removed)
    }

    pub fn add_category(&self, name: &str) -> Result<(), ServiceError> {
        let mut catalog = self.lock();
        catalog.add_category(name).map_err(Self::rejected)?;
        tracing::info!(category = %name, "category added");
        self.persist(&catalog, Touched::Categories)?;
        Ok(())
    }

    pub fn remove_category(&self, name: &str) -> Result<(), ServiceError> {
        let mut catalog = self.lock();
        catalog.remove_category(name).map_err(Self::rejected)?;
        tracing::info!(category = %name, "category removed");
        self.persist(&catalog, Touched::Categories)?;
        Ok(())
    }

    /// Write both snapshots unconditionally (shutdown, recovery after a failed write).
    pub fn flush(&self) -> Result<(), SnapshotError> {
        let catalog = self.lock();
        self.persist(&catalog, Touched::Products)
    }
}
