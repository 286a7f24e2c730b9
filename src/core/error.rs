// ============================================================================
// spark-bindings - Errors
// Construction-time contract violations and computation-time failures
// ============================================================================

use thiserror::Error;

/// A programmer mistake detected while building a binding.
///
/// Returned immediately by the factory; never deferred into computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("index must not be negative, got {index}")]
    NegativeIndex { index: i64 },
}

/// A failure inside a binding's computation.
///
/// Never escapes `get()`: the binding reports it to its diagnostic sink and
/// caches the default value of its result type instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("no entry for key {key}")]
    MissingKey { key: String },

    #[error("element at index {index} is absent")]
    NullElement { index: i64 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("computation failed: {0}")]
    Failed(String),
}

impl ComputeError {
    /// Wrap any error raised by a user compute function.
    pub fn failed(err: impl std::fmt::Display) -> Self {
        Self::Failed(err.to_string())
    }
}

pub type Result<T, E = BindingError> = std::result::Result<T, E>;
