//! Statement rewriting per dialect
//!
//! Every function here is plain text manipulation over its arguments. The
//! no-op dialect returns its input untouched; concrete dialects drop trailing
//! whitespace and `;` before appending or wrapping.

use crate::modifier::dialect::Dialect;
use crate::modifier::ordering::OrderSpec;
use crate::modifier::pagination::PageSpec;
use crate::validation::ValidatedFieldName;

/// Alias given to the derived table in count queries
pub const COUNT_TABLE_ALIAS: &str = "__hp_tempCountTl";

pub struct SqlGenerator;

impl SqlGenerator {
    pub fn dummy_order_by(sql: &str, _order: &[OrderSpec]) -> String {
        sql.to_string()
    }

    pub fn dummy_page(sql: &str, _page: &PageSpec) -> String {
        sql.to_string()
    }

    pub fn dummy_count(sql: &str, _count_column: Option<&ValidatedFieldName>) -> String {
        sql.to_string()
    }

    pub fn mysql_order_by(sql: &str, order: &[OrderSpec]) -> String {
        Self::append_order_clause(Dialect::MySql, sql, order)
    }

    /// `LIMIT <offset>, <size>`
    pub fn mysql_page(sql: &str, page: &PageSpec) -> String {
        format!(
            "{} LIMIT {}, {}",
            Self::statement_body(sql),
            page.offset(),
            page.page_size()
        )
    }

    pub fn mysql_count(sql: &str, count_column: Option<&ValidatedFieldName>) -> String {
        Self::wrap_count(Dialect::MySql, sql, count_column, true)
    }

    pub fn postgres_order_by(sql: &str, order: &[OrderSpec]) -> String {
        Self::append_order_clause(Dialect::Postgres, sql, order)
    }

    /// `LIMIT <size> OFFSET <offset>`
    pub fn postgres_page(sql: &str, page: &PageSpec) -> String {
        format!(
            "{} LIMIT {} OFFSET {}",
            Self::statement_body(sql),
            page.page_size(),
            page.offset()
        )
    }

    pub fn postgres_count(sql: &str, count_column: Option<&ValidatedFieldName>) -> String {
        Self::wrap_count(Dialect::Postgres, sql, count_column, true)
    }

    pub fn oracle_order_by(sql: &str, order: &[OrderSpec]) -> String {
        Self::append_order_clause(Dialect::Oracle, sql, order)
    }

    pub fn oracle_page(sql: &str, page: &PageSpec) -> String {
        Self::offset_fetch(sql, page)
    }

    /// Oracle rejects `AS` before a table alias
    pub fn oracle_count(sql: &str, count_column: Option<&ValidatedFieldName>) -> String {
        Self::wrap_count(Dialect::Oracle, sql, count_column, false)
    }

    pub fn sqlserver_order_by(sql: &str, order: &[OrderSpec]) -> String {
        Self::append_order_clause(Dialect::SqlServer, sql, order)
    }

    /// SQL Server only accepts OFFSET/FETCH after an ORDER BY clause.
    pub fn sqlserver_page(sql: &str, page: &PageSpec) -> String {
        Self::offset_fetch(sql, page)
    }

    pub fn sqlserver_count(sql: &str, count_column: Option<&ValidatedFieldName>) -> String {
        Self::wrap_count(Dialect::SqlServer, sql, count_column, true)
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(dialect: Dialect, order: &[OrderSpec]) -> String {
        if order.is_empty() {
            return "".to_string();
        }

        let order_items: Vec<String> = order
            .iter()
            .map(|spec| {
                format!(
                    "{} {}",
                    dialect.quote_identifier(spec.field()),
                    spec.order().to_sql()
                )
            })
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    fn append_order_clause(dialect: Dialect, sql: &str, order: &[OrderSpec]) -> String {
        if order.is_empty() {
            return sql.to_string();
        }

        format!(
            "{} {}",
            Self::statement_body(sql),
            Self::build_order_clause(dialect, order)
        )
    }

    fn offset_fetch(sql: &str, page: &PageSpec) -> String {
        format!(
            "{} OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
            Self::statement_body(sql),
            page.offset(),
            page.page_size()
        )
    }

    fn wrap_count(
        dialect: Dialect,
        sql: &str,
        count_column: Option<&ValidatedFieldName>,
        alias_keyword: bool,
    ) -> String {
        let target = match count_column {
            Some(column) => dialect.quote_identifier(column),
            None => "0".to_string(),
        };

        format!(
            "SELECT COUNT({}) FROM ({}){}{}",
            target,
            Self::statement_body(sql),
            if alias_keyword { " AS " } else { " " },
            COUNT_TABLE_ALIAS
        )
    }

    fn statement_body(sql: &str) -> &str {
        sql.trim_end().trim_end_matches(';').trim_end()
    }
}
