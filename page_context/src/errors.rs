use thiserror::Error;

/// Why a request context is done
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("Context cancelled")]
    Cancelled,

    #[error("Context deadline exceeded")]
    DeadlineExceeded,
}
