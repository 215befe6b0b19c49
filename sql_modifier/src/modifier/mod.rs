//! Statement modifiers
//!
//! Ordering and page types, the dialect list, the per-dialect rewriting
//! functions and the registry that resolves them by driver identifier.

pub mod dialect;
pub mod ordering;
pub mod pagination;
pub mod registry;
pub mod sql_generation;

#[cfg(test)]
mod tests;

pub use dialect::Dialect;
pub use ordering::{OrderBy, OrderSpec, SortOrder};
pub use pagination::{PageSpec, PageSummary};
pub use registry::{CountFn, Modifier, ModifierRegistry, OrderByFn, PageFn};
pub use sql_generation::{SqlGenerator, COUNT_TABLE_ALIAS};
