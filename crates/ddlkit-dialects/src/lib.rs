//! ddlkit dialects - the built-in SQL dialects
//!
//! Each dialect lives in its own crate behind a cargo feature. The registry
//! resolves a configured dialect name to an implementation and opens a
//! `SchemaBuilder` for it.

#[cfg(feature = "mysql")]
pub use ddlkit_dialect_mysql as mysql;
#[cfg(feature = "postgres")]
pub use ddlkit_dialect_postgres as postgres;
#[cfg(feature = "sqlite")]
pub use ddlkit_dialect_sqlite as sqlite;

mod registry;

pub use registry::{
    DialectFactory, DialectRegistry, canonical_dialect_name, create_dialect, open_schema,
};

/// Re-export commonly used types
pub use ddlkit_core::{Connection, DdlError, Result, Value};
pub use ddlkit_schema::{SchemaBuilder, SchemaConfig, SchemaDialect};
