//! Connection trait
//!
//! The connection is an external collaborator: ddlkit only reads through it
//! for introspection. Executing the generated DDL is the caller's business.

use crate::{Result, Row};
use async_trait::async_trait;

/// A database connection.
///
/// The contract is cursor-like: `execute` runs a statement and makes its rows
/// available to the next `fetch` / `fetch_all`. Callers issue one request at
/// a time per connection.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgresql", "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a statement. Fails if the database rejects it.
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Fetch the next row of the last executed statement, if any
    async fn fetch(&self) -> Result<Option<Row>>;

    /// Fetch all remaining rows of the last executed statement
    async fn fetch_all(&self) -> Result<Vec<Row>>;

    /// List the tables of the current database
    async fn tables(&self) -> Result<Vec<String>>;

    /// Execute `sql` and return its first row
    async fn fetch_row(&self, sql: &str) -> Result<Option<Row>> {
        self.execute(sql).await?;
        self.fetch().await
    }

    /// Execute `sql` and return all of its rows
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Row>> {
        self.execute(sql).await?;
        let rows = self.fetch_all().await?;
        tracing::trace!(rows = rows.len(), "fetched introspection rows");
        Ok(rows)
    }
}

/// Quote a string for interpolation into an introspection query
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
