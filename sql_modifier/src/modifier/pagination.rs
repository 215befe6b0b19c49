//! Page window and row-count metadata

use crate::errors::ModifierError;
use crate::validation::ValidatedFieldName;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Page window plus the total row count recorded after execution.
///
/// `total` is the only mutable part. It is written once by whoever runs the
/// count query and read by everyone holding the same `Arc<PageSpec>`.
#[derive(Debug)]
pub struct PageSpec {
    page: u64,
    page_size: u64,
    offset: u64,
    count: bool,
    count_column: Option<ValidatedFieldName>,
    total: AtomicU64,
}

impl PageSpec {
    /// Build a page window. Both values are 1-based and must be at least 1.
    pub fn new(page: i64, page_size: i64) -> Result<Self, ModifierError> {
        if page < 1 {
            return Err(ModifierError::InvalidPage(page));
        }
        if page_size < 1 {
            return Err(ModifierError::InvalidPageSize(page_size));
        }

        let (page, page_size) = (page as u64, page_size as u64);
        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or(ModifierError::OffsetOverflow { page, page_size })?;

        Ok(Self {
            page,
            page_size,
            offset,
            count: true,
            count_column: None,
            total: AtomicU64::new(0),
        })
    }

    /// Count a specific column instead of rows. An empty name counts rows.
    pub fn with_count_column(mut self, column: &str) -> Result<Self, ModifierError> {
        self.count = true;
        self.count_column = if column.is_empty() {
            None
        } else {
            Some(ValidatedFieldName::new(column)?)
        };
        Ok(self)
    }

    /// Skip the count query for this page
    pub fn without_count(mut self) -> Self {
        self.count = false;
        self.count_column = None;
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows skipped before this page: `(page - 1) * page_size`
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn count_enabled(&self) -> bool {
        self.count
    }

    /// Column passed to the count wrapper; `None` means `COUNT(0)`
    pub fn count_column(&self) -> Option<&ValidatedFieldName> {
        self.count_column.as_ref()
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    /// Record the observed row count
    pub fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Release);
    }

    pub fn total_pages(&self) -> u64 {
        self.total().div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether this page starts beyond the last row.
    ///
    /// Only meaningful once a count has been recorded with [`set_total`]:
    /// before that `total` is 0 and every page reports true.
    ///
    /// [`set_total`]: PageSpec::set_total
    pub fn is_past_end(&self) -> bool {
        self.offset >= self.total()
    }

    pub fn summary(&self) -> PageSummary {
        let total = self.total();
        PageSummary {
            page: self.page,
            page_size: self.page_size,
            total,
            total_pages: total.div_ceil(self.page_size),
        }
    }
}

impl Clone for PageSpec {
    fn clone(&self) -> Self {
        Self {
            page: self.page,
            page_size: self.page_size,
            offset: self.offset,
            count: self.count,
            count_column: self.count_column.clone(),
            total: AtomicU64::new(self.total()),
        }
    }
}

impl PartialEq for PageSpec {
    fn eq(&self, other: &Self) -> bool {
        self.page == other.page
            && self.page_size == other.page_size
            && self.count == other.count
            && self.count_column == other.count_column
            && self.total() == other.total()
    }
}

/// Point-in-time copy of the page metadata, for handing back to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}
