//! Tracing/logging setup shared by the binaries.

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{init, init_with, LogFormat};
