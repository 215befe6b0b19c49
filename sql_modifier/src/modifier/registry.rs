//! Modifier table keyed by driver identifier

use crate::errors::ModifierError;
use crate::modifier::dialect::Dialect;
use crate::modifier::ordering::OrderSpec;
use crate::modifier::pagination::PageSpec;
use crate::modifier::sql_generation::SqlGenerator;
use crate::validation::ValidatedFieldName;
use std::collections::HashMap;
use std::fmt;

pub type OrderByFn = fn(&str, &[OrderSpec]) -> String;
pub type PageFn = fn(&str, &PageSpec) -> String;
pub type CountFn = fn(&str, Option<&ValidatedFieldName>) -> String;

/// The three rewriting functions for one dialect.
///
/// Holds plain function pointers only, so a `Modifier` is `Copy` and can be
/// shared freely between threads.
#[derive(Clone, Copy)]
pub struct Modifier {
    pub order_by: OrderByFn,
    pub page: PageFn,
    pub count: CountFn,
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifier").finish_non_exhaustive()
    }
}

impl Modifier {
    pub const DUMMY: Modifier = Modifier {
        order_by: SqlGenerator::dummy_order_by,
        page: SqlGenerator::dummy_page,
        count: SqlGenerator::dummy_count,
    };

    pub const MYSQL: Modifier = Modifier {
        order_by: SqlGenerator::mysql_order_by,
        page: SqlGenerator::mysql_page,
        count: SqlGenerator::mysql_count,
    };

    pub const POSTGRES: Modifier = Modifier {
        order_by: SqlGenerator::postgres_order_by,
        page: SqlGenerator::postgres_page,
        count: SqlGenerator::postgres_count,
    };

    pub const ORACLE: Modifier = Modifier {
        order_by: SqlGenerator::oracle_order_by,
        page: SqlGenerator::oracle_page,
        count: SqlGenerator::oracle_count,
    };

    pub const SQLSERVER: Modifier = Modifier {
        order_by: SqlGenerator::sqlserver_order_by,
        page: SqlGenerator::sqlserver_page,
        count: SqlGenerator::sqlserver_count,
    };

    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Dummy => Self::DUMMY,
            Dialect::MySql => Self::MYSQL,
            Dialect::Postgres => Self::POSTGRES,
            Dialect::Oracle => Self::ORACLE,
            Dialect::SqlServer => Self::SQLSERVER,
        }
    }

    /// Append an ORDER BY clause; an empty list leaves the statement as is
    pub fn order_by(&self, sql: &str, order: &[OrderSpec]) -> String {
        (self.order_by)(sql, order)
    }

    /// Append the pagination clause for `page`
    pub fn page(&self, sql: &str, page: &PageSpec) -> String {
        (self.page)(sql, page)
    }

    /// Wrap `sql` in a row count; no `count_column` counts rows
    pub fn count(&self, sql: &str, count_column: Option<&ValidatedFieldName>) -> String {
        (self.count)(sql, count_column)
    }
}

/// Registry of modifiers, built once and shared by reference
#[derive(Debug, Clone, Default)]
pub struct ModifierRegistry {
    modifiers: HashMap<String, Modifier>,
}

impl ModifierRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in dialect under its canonical name and aliases
    pub fn with_builtin() -> Self {
        let mut modifiers = HashMap::new();

        for dialect in Dialect::ALL {
            for alias in dialect.aliases() {
                modifiers.insert(alias.to_string(), Modifier::for_dialect(dialect));
            }
        }

        Self { modifiers }
    }

    /// Register a modifier for a custom driver identifier
    pub fn register(&mut self, name: &str, modifier: Modifier) -> Result<(), ModifierError> {
        let key = Self::normalize(name);
        if self.modifiers.contains_key(&key) {
            return Err(ModifierError::DialectAlreadyRegistered(name.to_string()));
        }

        self.modifiers.insert(key, modifier);
        Ok(())
    }

    /// Resolve the modifier for a driver identifier
    pub fn get(&self, name: &str) -> Result<&Modifier, ModifierError> {
        self.modifiers.get(&Self::normalize(name)).ok_or_else(|| {
            tracing::warn!(dialect = name, "no modifier registered for dialect");
            ModifierError::UnsupportedDialect(name.to_string())
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modifiers.contains_key(&Self::normalize(name))
    }

    /// Registered identifiers, sorted
    pub fn dialects(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modifiers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn normalize(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }
}
