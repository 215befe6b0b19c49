//! Fluent page/order builder
//!
//! Buffers intent and applies it in one go on [`PageBuilder::build`]. The
//! result matches calling [`attach_order`] for each column in call order and
//! then [`attach_page_spec`].

use crate::context::RequestContext;
use crate::paging::{attach_order, attach_page_spec};
use sql_modifier::{ModifierError, PageSpec, SortOrder};

#[derive(Debug, Clone)]
enum CountIntent {
    Column(String),
    Skip,
}

/// Builder for paging and ordering intent on a context
#[derive(Debug, Clone)]
pub struct PageBuilder {
    ctx: RequestContext,
    page: Option<(i64, i64)>,
    count: Option<CountIntent>,
    order: Vec<(String, SortOrder)>,
}

/// Start building page/order intent on top of `ctx`
pub fn paginate(ctx: &RequestContext) -> PageBuilder {
    PageBuilder::new(ctx)
}

impl PageBuilder {
    pub fn new(ctx: &RequestContext) -> Self {
        Self {
            ctx: ctx.clone(),
            page: None,
            count: None,
            order: Vec::new(),
        }
    }

    /// Set the page window; a later call replaces an earlier one
    pub fn page(mut self, page: i64, page_size: i64) -> Self {
        self.page = Some((page, page_size));
        self
    }

    /// Count with `column`, or rows when empty
    pub fn count(mut self, column: &str) -> Self {
        self.count = Some(CountIntent::Column(column.to_string()));
        self
    }

    /// Do not run a count query for this page
    pub fn no_count(mut self) -> Self {
        self.count = Some(CountIntent::Skip);
        self
    }

    pub fn asc(self, field: &str) -> Self {
        self.order_by(field, SortOrder::Asc)
    }

    pub fn desc(self, field: &str) -> Self {
        self.order_by(field, SortOrder::Desc)
    }

    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order.push((field.to_string(), order));
        self
    }

    /// Validate everything and derive the final context
    pub fn build(self) -> Result<RequestContext, ModifierError> {
        let mut ctx = self.ctx;

        for (field, order) in &self.order {
            ctx = attach_order(&ctx, field, *order)?;
        }

        match (self.page, self.count) {
            (Some((page, page_size)), count) => {
                let mut spec = PageSpec::new(page, page_size)?;
                match count {
                    Some(CountIntent::Column(column)) => {
                        spec = spec.with_count_column(&column)?;
                    }
                    Some(CountIntent::Skip) => spec = spec.without_count(),
                    None => {}
                }
                ctx = attach_page_spec(&ctx, spec);
            }
            (None, Some(_)) => {
                tracing::warn!("count requested without a page; ignoring");
            }
            (None, None) => {}
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::{attach_page, order_info, page_info};

    #[test]
    fn test_build_matches_sequential_calls() {
        let base = RequestContext::background();
        let built = paginate(&base)
            .page(1, 2)
            .count("")
            .asc("id")
            .desc("created_at")
            .build()
            .unwrap();

        let sequential = attach_order(&base, "id", SortOrder::Asc).unwrap();
        let sequential = attach_order(&sequential, "created_at", SortOrder::Desc).unwrap();
        let sequential = attach_page(&sequential, 1, 2).unwrap();

        assert_eq!(order_info(&built), order_info(&sequential));
        assert_eq!(
            *page_info(&built).unwrap(),
            *page_info(&sequential).unwrap()
        );
    }

    #[test]
    fn test_nothing_applied_before_build() {
        let base = RequestContext::background();
        let builder = paginate(&base).page(1, 10).asc("id");

        assert!(page_info(&base).is_none());
        let ctx = builder.build().unwrap();
        assert!(page_info(&ctx).is_some());
        assert!(page_info(&base).is_none());
    }

    #[test]
    fn test_count_column_and_no_count() {
        let base = RequestContext::background();

        let ctx = paginate(&base).page(2, 5).count("id").build().unwrap();
        let page = page_info(&ctx).unwrap();
        assert!(page.count_enabled());
        assert_eq!(page.count_column().map(|c| c.as_str()), Some("id"));

        let ctx = paginate(&base).page(2, 5).no_count().build().unwrap();
        assert!(!page_info(&ctx).unwrap().count_enabled());
    }

    #[test]
    fn test_build_reports_first_invalid_input() {
        let base = RequestContext::background();

        assert_eq!(
            paginate(&base).page(0, 5).build().unwrap_err(),
            ModifierError::InvalidPage(0)
        );
        assert!(matches!(
            paginate(&base).page(1, 5).asc("1abc").build().unwrap_err(),
            ModifierError::InvalidField(_)
        ));
        assert!(matches!(
            paginate(&base).page(1, 5).count("a b").build().unwrap_err(),
            ModifierError::InvalidField(_)
        ));
    }

    #[test]
    fn test_later_page_call_replaces_earlier() {
        let ctx = paginate(&RequestContext::background())
            .page(1, 2)
            .page(3, 10)
            .build()
            .unwrap();
        let page = page_info(&ctx).unwrap();
        assert_eq!((page.page(), page.page_size()), (3, 10));
    }

    #[test]
    fn test_count_without_page_is_ignored() {
        let ctx = paginate(&RequestContext::background())
            .count("id")
            .desc("id")
            .build()
            .unwrap();
        assert!(page_info(&ctx).is_none());
        assert_eq!(order_info(&ctx).unwrap().len(), 1);
    }
}
