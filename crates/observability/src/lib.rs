//! Process-wide logging setup.

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize tracing/logging using `RUST_LOG` and `STOCKROOM_LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    let format = std::env::var("STOCKROOM_LOG_FORMAT")
        .ok()
        .and_then(|v| LogFormat::parse(&v))
        .unwrap_or_default();
    crate::tracing::init(format);
}
