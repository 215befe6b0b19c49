//! Modifier tests
//!
//! Exact output of every dialect's rewriting functions.

#[cfg(test)]
mod tests {
    use crate::errors::ModifierError;
    use crate::modifier::{Dialect, Modifier, ModifierRegistry, OrderBy, OrderSpec, PageSpec};
    use crate::validation::{ValidatedFieldName, ValidationError};

    fn order(field: &str) -> OrderBy {
        OrderBy::from(OrderSpec::asc(field).unwrap())
    }

    fn column(name: &str) -> ValidatedFieldName {
        ValidatedFieldName::new(name).unwrap()
    }

    // ========================================
    // MySQL
    // ========================================

    #[test]
    fn test_mysql_page_first_page() {
        let sql = Modifier::MYSQL.page("select * from x", &PageSpec::new(1, 2).unwrap());
        assert_eq!(sql, "select * from x LIMIT 0, 2");
    }

    #[test]
    fn test_mysql_page_offset_formula() {
        let sql = Modifier::MYSQL.page("select * from x", &PageSpec::new(2, 2).unwrap());
        assert_eq!(sql, "select * from x LIMIT 2, 2");

        for (page, size) in [(1_i64, 1_i64), (3, 10), (7, 25), (1000, 50)] {
            let spec = PageSpec::new(page, size).unwrap();
            assert_eq!(
                Modifier::MYSQL.page("select * from x", &spec),
                format!("select * from x LIMIT {}, {}", (page - 1) * size, size)
            );
        }
    }

    #[test]
    fn test_mysql_order_by() {
        let sql = Modifier::MYSQL.order_by("select ? from x", order("test").specs());
        assert_eq!(sql, "select ? from x ORDER BY `test` ASC");
    }

    #[test]
    fn test_mysql_order_by_multiple_columns() {
        let order = OrderBy::new()
            .with(OrderSpec::asc("name").unwrap())
            .with(OrderSpec::desc("u.created_at").unwrap());

        let sql = Modifier::MYSQL.order_by("select * from users u", order.specs());
        assert_eq!(
            sql,
            "select * from users u ORDER BY `name` ASC, `u`.`created_at` DESC"
        );
    }

    #[test]
    fn test_order_by_empty_list_is_identity() {
        let sql = "select * from x;";
        assert_eq!(Modifier::MYSQL.order_by(sql, &[]), sql);
    }

    #[test]
    fn test_mysql_count_rows() {
        let sql = Modifier::MYSQL.count("select ? from x", None);
        assert_eq!(sql, "SELECT COUNT(0) FROM (select ? from x) AS __hp_tempCountTl");
    }

    #[test]
    fn test_mysql_count_column() {
        let sql = Modifier::MYSQL.count("select ? from x", Some(&column("test")));
        assert_eq!(
            sql,
            "SELECT COUNT(`test`) FROM (select ? from x) AS __hp_tempCountTl"
        );
    }

    #[test]
    fn test_count_column_with_quote_characters_never_reaches_sql() {
        let hostile = "x`) FROM t; DROP TABLE t; -- ";
        assert_eq!(
            ValidatedFieldName::new(hostile).unwrap_err(),
            ValidationError::InvalidCharacters(hostile.to_string())
        );
        assert_eq!(
            PageSpec::new(1, 10).unwrap().with_count_column(hostile).unwrap_err(),
            ModifierError::InvalidField(ValidationError::InvalidCharacters(hostile.to_string()))
        );

        for name in ["a\"b", "a]b", "a`b"] {
            assert!(ValidatedFieldName::new(name).is_err(), "accepted {}", name);
        }
    }

    #[test]
    fn test_mysql_order_then_page() {
        let sql = Modifier::MYSQL.order_by("select ? from x", order("test").specs());
        let sql = Modifier::MYSQL.page(&sql, &PageSpec::new(2, 2).unwrap());
        assert_eq!(sql, "select ? from x ORDER BY `test` ASC LIMIT 2, 2");
    }

    #[test]
    fn test_trailing_semicolon_and_whitespace_removed() {
        let page = PageSpec::new(1, 10).unwrap();
        assert_eq!(
            Modifier::MYSQL.page("select * from x ;\n", &page),
            "select * from x LIMIT 0, 10"
        );
        assert_eq!(
            Modifier::MYSQL.count("select * from x;", None),
            "SELECT COUNT(0) FROM (select * from x) AS __hp_tempCountTl"
        );
    }

    // ========================================
    // Other dialects
    // ========================================

    #[test]
    fn test_postgres() {
        let m = Modifier::POSTGRES;
        let sql = m.order_by("select * from x", order("test").specs());
        assert_eq!(sql, "select * from x ORDER BY \"test\" ASC");

        let sql = m.page(&sql, &PageSpec::new(3, 10).unwrap());
        assert_eq!(sql, "select * from x ORDER BY \"test\" ASC LIMIT 10 OFFSET 20");

        assert_eq!(
            m.count("select * from x", Some(&column("id"))),
            "SELECT COUNT(\"id\") FROM (select * from x) AS __hp_tempCountTl"
        );
    }

    #[test]
    fn test_oracle() {
        let m = Modifier::ORACLE;
        assert_eq!(
            m.page("select * from x", &PageSpec::new(2, 5).unwrap()),
            "select * from x OFFSET 5 ROWS FETCH NEXT 5 ROWS ONLY"
        );
        assert_eq!(
            m.count("select * from x", None),
            "SELECT COUNT(0) FROM (select * from x) __hp_tempCountTl"
        );
    }

    #[test]
    fn test_sqlserver() {
        let m = Modifier::SQLSERVER;
        let sql = m.order_by("select * from x", order("id").specs());
        let sql = m.page(&sql, &PageSpec::new(1, 20).unwrap());
        assert_eq!(
            sql,
            "select * from x ORDER BY [id] ASC OFFSET 0 ROWS FETCH NEXT 20 ROWS ONLY"
        );
        assert_eq!(
            m.count("select * from x", Some(&column("dbo.id"))),
            "SELECT COUNT([dbo].[id]) FROM (select * from x) AS __hp_tempCountTl"
        );
    }

    #[test]
    fn test_dummy_is_identity() {
        let sql = "select * from x where a = ? ;";
        let m = Modifier::DUMMY;
        assert_eq!(m.order_by(sql, order("test").specs()), sql);
        assert_eq!(m.page(sql, &PageSpec::new(9, 99).unwrap()), sql);
        assert_eq!(m.count(sql, None), sql);
        assert_eq!(m.count(sql, Some(&column("id"))), sql);
    }

    // ========================================
    // Registry
    // ========================================

    #[test]
    fn test_registry_resolves_builtin() {
        let registry = ModifierRegistry::with_builtin();
        let page = PageSpec::new(1, 2).unwrap();

        for dialect in Dialect::ALL {
            let m = registry.get(dialect.name()).unwrap();
            let expected = Modifier::for_dialect(dialect).page("select 1", &page);
            assert_eq!(m.page("select 1", &page), expected);
        }

        let m = registry.get("PostgreSQL").unwrap();
        assert_eq!(m.page("select 1", &page), "select 1 LIMIT 2 OFFSET 0");
    }

    #[test]
    fn test_registry_and_parsing_share_aliases() {
        let registry = ModifierRegistry::with_builtin();
        let page = PageSpec::new(2, 3).unwrap();
        let expected: usize = Dialect::ALL.iter().map(|d| d.aliases().len()).sum();
        assert_eq!(registry.dialects().len(), expected);

        for dialect in Dialect::ALL {
            for alias in dialect.aliases() {
                assert_eq!(alias.parse::<Dialect>().unwrap(), dialect);
                assert_eq!(
                    registry.get(alias).unwrap().page("select 1", &page),
                    Modifier::for_dialect(dialect).page("select 1", &page)
                );
            }
        }
    }

    #[test]
    fn test_registry_unsupported_dialect() {
        let registry = ModifierRegistry::with_builtin();
        assert_eq!(
            registry.get("sqlite").unwrap_err(),
            ModifierError::UnsupportedDialect("sqlite".to_string())
        );
        assert!(ModifierRegistry::new().get("mysql").is_err());
    }

    #[test]
    fn test_registry_custom_dialect() {
        fn upper_page(sql: &str, page: &PageSpec) -> String {
            format!("{} FIRST {} SKIP {}", sql, page.page_size(), page.offset())
        }

        let mut registry = ModifierRegistry::with_builtin();
        let custom = Modifier {
            page: upper_page,
            ..Modifier::DUMMY
        };

        registry.register("informix", custom).unwrap();
        assert!(registry.contains("INFORMIX"));
        assert_eq!(
            registry
                .get("informix")
                .unwrap()
                .page("select * from x", &PageSpec::new(2, 10).unwrap()),
            "select * from x FIRST 10 SKIP 10"
        );

        assert_eq!(
            registry.register("mysql", custom).unwrap_err(),
            ModifierError::DialectAlreadyRegistered("mysql".to_string())
        );
    }

    #[test]
    fn test_registry_lists_dialects() {
        let registry = ModifierRegistry::with_builtin();
        let names = registry.dialects();
        for dialect in Dialect::ALL {
            assert!(names.contains(&dialect.name()));
        }
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_modifier_shared_across_threads() {
        let registry = std::sync::Arc::new(ModifierRegistry::with_builtin());
        let handles: Vec<_> = (1..=4_i64)
            .map(|page| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let spec = PageSpec::new(page, 10).unwrap();
                    registry.get("mysql").unwrap().page("select 1", &spec)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                format!("select 1 LIMIT {}, 10", i * 10)
            );
        }
    }
}
