//! Order engine error model.

use thiserror::Error;

/// Result type used across the order engine.
pub type OrderResult<T> = Result<T, OrderError>;

/// Contract violations raised by the order engine.
///
/// A rejected order (one that failed validation) is a normal outcome, not an
/// error. These variants only cover calls made in a state or with arguments
/// the engine cannot accept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The call is not allowed in the builder's current state
    /// (e.g. processing without an order).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An argument was absent or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl OrderError {
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
