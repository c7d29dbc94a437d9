use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use stockroom_catalog::{CategoriesSnapshot, ProductsSnapshot};

/// Both persisted structures, as read back from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedSnapshot {
    pub products: ProductsSnapshot,
    pub categories: CategoriesSnapshot,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse snapshot {path}: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable storage for catalog snapshots.
///
/// Saves replace the whole resource. A resource that was never written loads
/// as empty.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<LoadedSnapshot, SnapshotError>;
    fn save_products(&self, snapshot: &ProductsSnapshot) -> Result<(), SnapshotError>;
    fn save_categories(&self, snapshot: &CategoriesSnapshot) -> Result<(), SnapshotError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> Result<LoadedSnapshot, SnapshotError> {
        (**self).load()
    }

    fn save_products(&self, snapshot: &ProductsSnapshot) -> Result<(), SnapshotError> {
        (**self).save_products(snapshot)
    }

    fn save_categories(&self, snapshot: &CategoriesSnapshot) -> Result<(), SnapshotError> {
        (**self).save_categories(snapshot)
    }
}
