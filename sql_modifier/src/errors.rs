use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModifierError {
    #[error("Invalid page number: {0} (must be at least 1)")]
    InvalidPage(i64),

    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(i64),

    #[error("Page offset overflows for page {page} with page size {page_size}")]
    OffsetOverflow { page: u64, page_size: u64 },

    #[error("Invalid field: {0}")]
    InvalidField(#[from] ValidationError),

    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("Dialect already registered: {0}")]
    DialectAlreadyRegistered(String),
}
