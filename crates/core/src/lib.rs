//! `stockroom-core` — shared catalog primitives.
//!
//! Identifiers and the error model used by every other crate. No IO lives here.

pub mod error;
pub mod id;

pub use error::{CatalogError, CatalogResult, ErrorKind};
pub use id::{IdGenerator, ProductId, UuidIdGenerator};
