//! Convenience re-exports for common page-context usage

pub use crate::builder::{paginate, PageBuilder};
pub use crate::context::{CancelHandle, RequestContext};
pub use crate::errors::ContextError;
pub use crate::paging::{
    attach_order, attach_page, attach_page_spec, order_info, page_info, page_summary, record_total,
    total,
};

// Value types stored on the context
pub use sql_modifier::{OrderBy, OrderSpec, PageSpec, PageSummary, SortOrder};
