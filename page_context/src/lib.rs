//! Page Context - request-scoped paging and ordering state
//!
//! This crate carries page/order intent from the call site to whoever builds
//! the SQL, on a cancellable, deadline-bearing request context.

pub mod builder;
pub mod context;
pub mod errors;
pub mod paging;
pub mod prelude;

pub use builder::{paginate, PageBuilder};
pub use context::{CancelHandle, RequestContext};
pub use errors::ContextError;
pub use paging::{
    attach_order, attach_page, attach_page_spec, order_info, page_info, page_summary, record_total,
    total,
};
