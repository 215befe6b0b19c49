//! SQL Modifier - dialect-aware statement rewriting for pagehelper
//!
//! This crate provides the value types that describe ordering and paging
//! intent, and the per-dialect functions that turn a base statement into its
//! ordered, paginated and counted variants.

pub mod errors;
pub mod modifier;
pub mod prelude;
pub mod validation;

pub use errors::ModifierError;
pub use modifier::{
    Dialect, Modifier, ModifierRegistry, OrderBy, OrderSpec, PageSpec, PageSummary, SortOrder,
};
pub use validation::{ValidatedFieldName, ValidationError};
