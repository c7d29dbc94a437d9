//! Catalog domain module.
//!
//! This crate holds the product list and the category registry and the rules
//! that keep them consistent, implemented purely as in-memory logic (no IO, no
//! HTTP, no storage). Persistence and locking live in `stockroom-infra`.

pub mod operations;
pub mod product;
pub mod snapshot;
pub mod store;

pub use operations::StockChange;
pub use product::{NewProduct, Product, Rating};
pub use snapshot::{CategoriesSnapshot, ProductsSnapshot};
pub use store::Catalog;
