use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use stockroom_catalog::{CategoriesSnapshot, ProductsSnapshot};

use super::r#trait::{LoadedSnapshot, SnapshotError, SnapshotStore};

/// Snapshot store backed by two pretty-printed JSON files.
///
/// Every save writes a sibling `*.tmp` file, syncs it, then renames it over
/// the target, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    products_path: PathBuf,
    categories_path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(products_path: impl Into<PathBuf>, categories_path: impl Into<PathBuf>) -> Self {
        Self {
            products_path: products_path.into(),
            categories_path: categories_path.into(),
        }
    }

    /// `products.json` and `categories.json` under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("products.json"), dir.join("categories.json"))
    }

    pub fn products_path(&self) -> &Path {
        &self.products_path
    }

    pub fn categories_path(&self) -> &Path {
        &self.categories_path
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SnapshotError + '_ {
    move |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn read_json<T>(path: &Path) -> Result<Option<T>, SnapshotError>
where
    T: DeserializeOwned,
{
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(path)(e)),
    };

    // An empty file is treated like a missing one.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| SnapshotError::Deserialize {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T>(path: &Path, value: &T) -> Result<(), SnapshotError>
where
    T: Serialize,
{
    let bytes = serde_json::to_vec_pretty(value).map_err(SnapshotError::Serialize)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = write_and_rename(&tmp, path, &bytes);
    if result.is_err() {
        // Leave no partial `.tmp` sibling behind; the target is untouched.
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
    let mut file = fs::File::create(tmp).map_err(io_err(tmp))?;
    file.write_all(bytes).map_err(io_err(tmp))?;
    file.sync_all().map_err(io_err(tmp))?;
    drop(file);

    fs::rename(tmp, path).map_err(io_err(path))
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<LoadedSnapshot, SnapshotError> {
        let products = read_json::<ProductsSnapshot>(&self.products_path)?.unwrap_or_default();
        let categories =
            read_json::<CategoriesSnapshot>(&self.categories_path)?.unwrap_or_default();
        Ok(LoadedSnapshot {
            products,
            categories,
        })
    }

    fn save_products(&self, snapshot: &ProductsSnapshot) -> Result<(), SnapshotError> {
        write_json(&self.products_path, snapshot)
    }

    fn save_categories(&self, snapshot: &CategoriesSnapshot) -> Result<(), SnapshotError> {
        write_json(&self.categories_path, snapshot)
    }
}
