//! Configuration loading and representation.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::JsonFileSnapshotStore;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PRODUCTS_FILE: &str = "products.json";
pub const DEFAULT_CATEGORIES_FILE: &str = "categories.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Process configuration, read from `STOCKROOM_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub products_file: String,
    pub categories_file: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("STOCKROOM_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "STOCKROOM_BIND_ADDR",
                message: format!("{bind_raw:?}: {e}"),
            })?;

        let data_dir = get("STOCKROOM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let products_file = file_name(
            "STOCKROOM_PRODUCTS_FILE",
            get("STOCKROOM_PRODUCTS_FILE"),
            DEFAULT_PRODUCTS_FILE,
        )?;
        let categories_file = file_name(
            "STOCKROOM_CATEGORIES_FILE",
            get("STOCKROOM_CATEGORIES_FILE"),
            DEFAULT_CATEGORIES_FILE,
        )?;

        if products_file == categories_file {
            return Err(ConfigError::Invalid {
                var: "STOCKROOM_CATEGORIES_FILE",
                message: "must differ from STOCKROOM_PRODUCTS_FILE".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            data_dir,
            products_file,
            categories_file,
        })
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.data_dir.join(&self.categories_file)
    }

    pub fn snapshot_store(&self) -> JsonFileSnapshotStore {
        JsonFileSnapshotStore::new(self.products_path(), self.categories_path())
    }
}

fn file_name(
    var: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<String, ConfigError> {
    let name = value.unwrap_or_else(|| default.to_string());
    if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::Invalid {
            var,
            message: format!("{name:?} must be a bare file name"),
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = from_map(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.products_path(), PathBuf::from("./products.json"));
        assert_eq!(cfg.categories_path(), PathBuf::from("./categories.json"));
    }

    #[test]
    fn overrides_are_honoured() {
        let cfg = from_map(&[
            ("STOCKROOM_BIND_ADDR", "127.0.0.1:9000"),
            ("STOCKROOM_DATA_DIR", "/var/lib/stockroom"),
            ("STOCKROOM_PRODUCTS_FILE", "p.json"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(
            cfg.products_path(),
            PathBuf::from("/var/lib/stockroom/p.json")
        );
        assert_eq!(cfg.categories_file, "categories.json");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            from_map(&[("STOCKROOM_BIND_ADDR", "not-an-addr")]),
            Err(ConfigError::Invalid { var: "STOCKROOM_BIND_ADDR", .. })
        ));
        assert!(from_map(&[("STOCKROOM_PRODUCTS_FILE", "../escape.json")]).is_err());
        assert!(from_map(&[("STOCKROOM_PRODUCTS_FILE", "categories.json")]).is_err());
    }
}
