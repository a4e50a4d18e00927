use thiserror::Error;

/// Errors surfaced by inference. Both are final: inference is pure, so the
/// same input reproduces the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("nesting depth exceeds the limit of {limit} at {path}")]
    DepthExceeded { limit: usize, path: String },
}

impl InferError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        InferError::InvalidInput { reason: reason.into() }
    }
}

pub type Result<T, E = InferError> = std::result::Result<T, E>;
