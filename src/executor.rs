//! Query execution seam
//!
//! [`SqlExecutor`] is what [`crate::PageHelper::select`] drives: one call for
//! the count statement, one for the page of rows. [`PgExecutor`] runs both on
//! a PostgreSQL pool.

use crate::errors::PageHelperError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use std::marker::PhantomData;

#[async_trait]
pub trait SqlExecutor: Send + Sync {
    type Row: Send;

    /// Run a row-returning statement
    async fn fetch_rows(&self, sql: &str, params: &[Value])
        -> Result<Vec<Self::Row>, PageHelperError>;

    /// Run a statement returning a single integer
    async fn fetch_count(&self, sql: &str, params: &[Value]) -> Result<i64, PageHelperError>;
}

// JSON parameters become typed binds: RFC3339 strings as timestamps, UUID
// strings as uuids, integers as i32 when they fit.
macro_rules! bind_json_param {
    ($query:expr, $param:expr) => {
        match $param {
            Value::String(s) => {
                if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    $query.bind(dt.with_timezone(&chrono::Utc))
                } else if let Ok(uuid) = uuid::Uuid::parse_str(&s) {
                    $query.bind(uuid)
                } else {
                    $query.bind(s)
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            Value::Bool(b) => $query.bind(b),
            Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}

/// Executor over a PostgreSQL pool, decoding rows into `T`
pub struct PgExecutor<T> {
    pool: PgPool,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> PgExecutor<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl<T> Clone for PgExecutor<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T> std::fmt::Debug for PgExecutor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgExecutor")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

#[async_trait]
impl<T> SqlExecutor for PgExecutor<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    type Row = T;

    async fn fetch_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<T>, PageHelperError> {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = bind_json_param!(query, param.clone());
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_count(&self, sql: &str, params: &[Value]) -> Result<i64, PageHelperError> {
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        for param in params {
            query = bind_json_param!(query, param.clone());
        }

        Ok(query.fetch_one(&self.pool).await?)
    }
}
