//! Convenience re-exports for common pagehelper usage
//!
//! # Example
//!
//! ```rust
//! use pagehelper::prelude::*;
//!
//! let ctx = paginate(&RequestContext::background()).page(1, 10).asc("id").build().unwrap();
//! assert_eq!(page_info(&ctx).unwrap().page_size(), 10);
//! ```

// Core components
pub use crate::errors::PageHelperError;
pub use crate::executor::{PgExecutor, SqlExecutor};
pub use crate::helper::{PageHelper, RewrittenSql};

// Config
pub use config::{AppConfig, ConfigError, HelperConfig, PagingConfig};

// Context and accumulation layer
pub use page_context::prelude::*;

// Dialects and modifiers
pub use sql_modifier::prelude::*;

// Common external dependencies
pub use async_trait::async_trait;
pub use serde_json::Value;
pub use sqlx::{FromRow, PgPool};
pub use tokio;
