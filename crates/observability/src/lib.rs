//! Tracing/logging setup shared by binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use tracing::{LogFormat, UnknownLogFormat, init, init_with};
