//! Supported SQL dialects

use crate::errors::ModifierError;
use crate::validation::ValidatedFieldName;
use std::fmt;
use std::str::FromStr;

/// Dialects with built-in modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Leaves statements untouched
    Dummy,
    MySql,
    Postgres,
    Oracle,
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Dummy,
        Dialect::MySql,
        Dialect::Postgres,
        Dialect::Oracle,
        Dialect::SqlServer,
    ];

    /// Canonical driver identifier
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Dummy => "default",
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgre",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Every identifier this dialect answers to, canonical name first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Dialect::Dummy => &["default", "dummy"],
            Dialect::MySql => &["mysql"],
            Dialect::Postgres => &["postgre", "postgres", "postgresql"],
            Dialect::Oracle => &["oracle"],
            Dialect::SqlServer => &["sqlserver", "mssql"],
        }
    }

    /// Quote a (possibly qualified) column name, one segment at a time
    pub fn quote_identifier(&self, field: &ValidatedFieldName) -> String {
        let (open, close) = match self {
            Dialect::Dummy => return field.as_str().to_string(),
            Dialect::MySql => ('`', '`'),
            Dialect::Postgres | Dialect::Oracle => ('"', '"'),
            Dialect::SqlServer => ('[', ']'),
        };

        field
            .segments()
            .map(|segment| format!("{}{}{}", open, segment, close))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Dialect::ALL
            .into_iter()
            .find(|dialect| dialect.aliases().iter().any(|alias| *alias == key))
            .ok_or_else(|| ModifierError::UnsupportedDialect(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
        }
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!(" mssql ".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("dummy".parse::<Dialect>().unwrap(), Dialect::Dummy);
        assert_eq!(
            "sqlite".parse::<Dialect>().unwrap_err(),
            ModifierError::UnsupportedDialect("sqlite".to_string())
        );
    }

    #[test]
    fn test_quote_identifier() {
        let field = ValidatedFieldName::new("u.created_at").unwrap();
        assert_eq!(Dialect::MySql.quote_identifier(&field), "`u`.`created_at`");
        assert_eq!(Dialect::Postgres.quote_identifier(&field), "\"u\".\"created_at\"");
        assert_eq!(Dialect::SqlServer.quote_identifier(&field), "[u].[created_at]");
        assert_eq!(Dialect::Dummy.quote_identifier(&field), "u.created_at");
    }

    #[test]
    fn test_canonical_name_is_first_alias() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.aliases()[0], dialect.name());
        }
    }
}
