//! HTTP API: routing and request/response mapping for the catalog service.

pub mod app;
pub mod shutdown;
