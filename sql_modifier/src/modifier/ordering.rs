//! Ordering types
//!
//! One [`OrderSpec`] per sorted column; [`OrderBy`] keeps them in clause order.

use crate::errors::ModifierError;
use crate::validation::ValidatedFieldName;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// A single column and direction to sort by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    field: ValidatedFieldName,
    order: SortOrder,
}

impl OrderSpec {
    pub fn new(field: &str, order: SortOrder) -> Result<Self, ModifierError> {
        Ok(Self {
            field: ValidatedFieldName::new(field)?,
            order,
        })
    }

    pub fn asc(field: &str) -> Result<Self, ModifierError> {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: &str) -> Result<Self, ModifierError> {
        Self::new(field, SortOrder::Desc)
    }

    pub fn field(&self) -> &ValidatedFieldName {
        &self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

/// Ordered list of sort columns.
///
/// Adding a field that is already present replaces its direction and keeps
/// its position; new fields go to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    specs: Vec<OrderSpec>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, spec: OrderSpec) {
        match self.specs.iter_mut().find(|s| s.field == spec.field) {
            Some(existing) => existing.order = spec.order,
            None => self.specs.push(spec),
        }
    }

    pub fn with(mut self, spec: OrderSpec) -> Self {
        self.push(spec);
        self
    }

    pub fn specs(&self) -> &[OrderSpec] {
        &self.specs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderSpec> {
        self.specs.iter()
    }

    /// The final column in clause order
    pub fn last(&self) -> Option<&OrderSpec> {
        self.specs.last()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl From<OrderSpec> for OrderBy {
    fn from(spec: OrderSpec) -> Self {
        Self { specs: vec![spec] }
    }
}

impl<'a> IntoIterator for &'a OrderBy {
    type Item = &'a OrderSpec;
    type IntoIter = std::slice::Iter<'a, OrderSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
