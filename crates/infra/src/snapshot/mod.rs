//! Snapshot persistence boundary.
//!
//! The catalog is persisted as two resources, each overwritten wholesale on
//! every mutation that touches it: the product list and the category registry.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemorySnapshotStore;
pub use json_file::JsonFileSnapshotStore;
pub use r#trait::{LoadedSnapshot, SnapshotError, SnapshotStore};
