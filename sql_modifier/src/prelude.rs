//! Convenience re-exports for common sql-modifier usage

// Error types
pub use crate::errors::ModifierError;

// Ordering and paging
pub use crate::modifier::{OrderBy, OrderSpec, PageSpec, PageSummary, SortOrder};

// Dialects and their rewriting functions
pub use crate::modifier::{Dialect, Modifier, ModifierRegistry};

// Validation
pub use crate::validation::{ValidatedFieldName, ValidationError};
