//! Infrastructure layer: snapshot persistence, configuration, service wiring.

pub mod config;
pub mod service;
pub mod snapshot;

pub use config::{AppConfig, ConfigError};
pub use service::{CatalogService, ServiceError};
pub use snapshot::{InMemorySnapshotStore, JsonFileSnapshotStore, SnapshotError, SnapshotStore};
