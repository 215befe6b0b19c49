//! Core pagehelper functionality
//!
//! [`PageHelper`] ties one resolved dialect to the paging defaults from the
//! configuration. It turns the page/order intent stored on a request context
//! into the statements to run, and drives an executor through the count and
//! page queries.

use crate::errors::PageHelperError;
use crate::executor::SqlExecutor;
use config::AppConfig;
use page_context::{attach_page_spec, order_info, page_info, RequestContext};
use serde_json::Value;
use sql_modifier::{Modifier, ModifierError, ModifierRegistry, PageSpec, ValidatedFieldName};
use std::sync::Arc;

/// Statements derived from a base query and the intent on a context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenSql {
    /// Base query with ORDER BY and pagination applied
    pub sql: String,
    /// Count statement to run first, when the page asks for one
    pub count_sql: Option<String>,
}

/// Main coordinator: one dialect, one set of paging defaults
#[derive(Debug, Clone)]
pub struct PageHelper {
    registry: Arc<ModifierRegistry>,
    modifier: Modifier,
    config: AppConfig,
}

impl PageHelper {
    /// Create a helper over the built-in dialects
    pub fn new(config: AppConfig) -> Result<Self, PageHelperError> {
        Self::with_registry(config, Arc::new(ModifierRegistry::with_builtin()))
    }

    /// Create a helper resolving its dialect from a shared registry
    pub fn with_registry(
        config: AppConfig,
        registry: Arc<ModifierRegistry>,
    ) -> Result<Self, PageHelperError> {
        config.validate()?;
        let modifier = *registry.get(&config.helper.dialect)?;

        let count_column = &config.paging.count_column;
        if !count_column.is_empty() {
            ValidatedFieldName::new(count_column).map_err(ModifierError::from)?;
        }

        debug_log!("page helper using dialect {}", config.helper.dialect);

        Ok(Self {
            registry,
            modifier,
            config,
        })
    }

    /// Load configuration from the environment and build a helper
    pub fn from_env() -> Result<Self, PageHelperError> {
        Self::new(AppConfig::load()?)
    }

    pub fn modifier(&self) -> &Modifier {
        &self.modifier
    }

    pub fn dialect(&self) -> &str {
        &self.config.helper.dialect
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Attach a page using the configured defaults for size and counting
    pub fn start_page(
        &self,
        ctx: &RequestContext,
        page: i64,
        page_size: Option<i64>,
    ) -> Result<RequestContext, PageHelperError> {
        let paging = &self.config.paging;
        let page_size = page_size
            .unwrap_or_else(|| i64::try_from(paging.default_page_size).unwrap_or(i64::MAX));

        let spec = PageSpec::new(page, page_size)?;
        self.check_page_size(&spec)?;

        let spec = if paging.count_by_default {
            spec.with_count_column(&paging.count_column)?
        } else {
            spec.without_count()
        };

        Ok(attach_page_spec(ctx, spec))
    }

    /// Statements `select` would run for `sql` under `ctx`, without running them
    pub fn rewrite(
        &self,
        ctx: &RequestContext,
        sql: &str,
    ) -> Result<RewrittenSql, PageHelperError> {
        let mut rewritten = sql.to_string();

        if let Some(order) = order_info(ctx) {
            rewritten = self.modifier.order_by(&rewritten, order.specs());
        }

        let mut count_sql = None;
        if let Some(page) = page_info(ctx) {
            self.check_page_size(&page)?;

            if page.count_enabled() {
                // The count wraps the unordered query. A modifier with no
                // count form hands the statement back unchanged.
                let count = self.modifier.count(sql, page.count_column());
                if count != sql {
                    count_sql = Some(count);
                }
            }

            rewritten = self.modifier.page(&rewritten, &page);
        }

        trace_log!("rewrote {:?} into {:?}", sql, rewritten);

        Ok(RewrittenSql {
            sql: rewritten,
            count_sql,
        })
    }

    /// Run `sql` with the paging and ordering attached to `ctx`.
    ///
    /// When the page asks for a count, the count runs first and its result is
    /// written into the page spec on `ctx`. An empty result set or a page past
    /// the last row skips the row query. Refuses to start on a context that is
    /// already done, and stops waiting as soon as it becomes done.
    pub async fn select<E>(
        &self,
        ctx: &RequestContext,
        executor: &E,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<E::Row>, PageHelperError>
    where
        E: SqlExecutor,
    {
        if let Some(reason) = ctx.err() {
            return Err(reason.into());
        }

        let rewritten = self.rewrite(ctx, sql)?;

        tokio::select! {
            result = self.run(ctx, executor, &rewritten, params) => result,
            reason = ctx.done() => {
                tracing::warn!(%reason, "query abandoned, request context is done");
                Err(reason.into())
            }
        }
    }

    async fn run<E>(
        &self,
        ctx: &RequestContext,
        executor: &E,
        rewritten: &RewrittenSql,
        params: &[Value],
    ) -> Result<Vec<E::Row>, PageHelperError>
    where
        E: SqlExecutor,
    {
        if let (Some(count_sql), Some(page)) = (&rewritten.count_sql, page_info(ctx)) {
            debug_log!("count query: {}", count_sql);

            let count = executor.fetch_count(count_sql, params).await?;
            let total = u64::try_from(count).map_err(|_| PageHelperError::NegativeCount(count))?;
            page.set_total(total);

            if page.is_past_end() {
                tracing::debug!(
                    total,
                    page = page.page(),
                    "page starts past the last row, skipping row query"
                );
                return Ok(Vec::new());
            }
        }

        debug_log!("page query: {}", rewritten.sql);
        executor.fetch_rows(&rewritten.sql, params).await
    }

    fn check_page_size(&self, page: &PageSpec) -> Result<(), PageHelperError> {
        let max = self.config.paging.max_page_size;
        if page.page_size() > max {
            return Err(PageHelperError::PageSizeTooLarge {
                requested: page.page_size(),
                max,
            });
        }
        Ok(())
    }
}
