//! Tracing/logging setup shared by the order engine binaries.

/// Initialize process-wide tracing/logging.
///
/// The output format comes from `LOG_FORMAT` (`json` or `pretty`). This is safe
/// to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use self::tracing::LogFormat;
