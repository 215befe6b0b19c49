//! Page and order intent carried on a request context
//!
//! Attaching derives a new context; the input context is left as it was.
//! Paging is last-attach-wins. Ordering accumulates: each attach appends a
//! column, and re-attaching a column that is already present changes its
//! direction in place.

use crate::context::RequestContext;
use sql_modifier::{ModifierError, OrderBy, OrderSpec, PageSpec, PageSummary, SortOrder};
use std::sync::Arc;

// Private slot types so other values on the context can never collide.
struct PageSlot(Arc<PageSpec>);
struct OrderSlot(Arc<OrderBy>);

/// Derive a context that paginates with `page` (1-based) and `page_size`
pub fn attach_page(
    ctx: &RequestContext,
    page: i64,
    page_size: i64,
) -> Result<RequestContext, ModifierError> {
    Ok(attach_page_spec(ctx, PageSpec::new(page, page_size)?))
}

/// Derive a context carrying an already-built page spec
pub fn attach_page_spec(ctx: &RequestContext, spec: PageSpec) -> RequestContext {
    tracing::debug!(
        page = spec.page(),
        page_size = spec.page_size(),
        count = spec.count_enabled(),
        "attaching page to context"
    );
    ctx.with_value(PageSlot(Arc::new(spec)))
}

/// Derive a context that additionally sorts by `field`
pub fn attach_order(
    ctx: &RequestContext,
    field: &str,
    order: SortOrder,
) -> Result<RequestContext, ModifierError> {
    let spec = OrderSpec::new(field, order)?;
    let mut order_by = order_info(ctx)
        .map(|current| current.as_ref().clone())
        .unwrap_or_default();
    order_by.push(spec);

    Ok(ctx.with_value(OrderSlot(Arc::new(order_by))))
}

/// Page spec nearest to `ctx`, shared with every other holder of the context
pub fn page_info(ctx: &RequestContext) -> Option<Arc<PageSpec>> {
    ctx.value::<PageSlot>().map(|slot| slot.0.clone())
}

/// Accumulated ordering nearest to `ctx`
pub fn order_info(ctx: &RequestContext) -> Option<Arc<OrderBy>> {
    ctx.value::<OrderSlot>().map(|slot| slot.0.clone())
}

/// Total rows recorded for the current page, 0 when nothing was recorded
pub fn total(ctx: &RequestContext) -> u64 {
    page_info(ctx).map(|page| page.total()).unwrap_or(0)
}

/// Snapshot of the page metadata on `ctx`
pub fn page_summary(ctx: &RequestContext) -> Option<PageSummary> {
    page_info(ctx).map(|page| page.summary())
}

/// Write the observed row count into the page spec held by `ctx`.
///
/// Returns false when no page was attached. Every context sharing that page
/// sees the new total; no new context is derived.
pub fn record_total(ctx: &RequestContext, total: u64) -> bool {
    match page_info(ctx) {
        Some(page) => {
            tracing::debug!(total, page = page.page(), "recording total on page");
            page.set_total(total);
            true
        }
        None => false,
    }
}
