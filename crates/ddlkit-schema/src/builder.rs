//! Schema builder facade
//!
//! `SchemaBuilder` pairs a dialect with a datasource name and, for
//! introspection, an explicitly bound connection.

use crate::{
    ColumnDefinition, ColumnOptions, ForeignKeyLookup, ForeignKeyOptions, IndexOptions,
    SchemaDialect, TableDefinition, TableOptions, alter, build_column, create_table,
};
use ddlkit_core::{
    Connection, DdlError, ForeignKeyInfo, IndexInfo, Result, TableSchema, Value,
};
use std::fmt;
use std::sync::Arc;

const DEFAULT_DATASOURCE: &str = "default";

#[derive(Clone)]
pub struct SchemaBuilder {
    dialect: Arc<dyn SchemaDialect>,
    datasource: String,
    connection: Option<Arc<dyn Connection>>,
}

impl fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("dialect", &self.dialect.name())
            .field("datasource", &self.datasource)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}

impl SchemaBuilder {
    /// Create an unbound builder on the "default" datasource
    pub fn new(dialect: Arc<dyn SchemaDialect>) -> Self {
        Self {
            dialect,
            datasource: DEFAULT_DATASOURCE.to_string(),
            connection: None,
        }
    }

    pub fn with_datasource(mut self, datasource: impl Into<String>) -> Self {
        self.datasource = datasource.into();
        self
    }

    pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Bind (or replace) the connection used for introspection
    pub fn bind(&mut self, connection: Arc<dyn Connection>) {
        tracing::debug!(
            datasource = %self.datasource,
            driver = connection.driver_name(),
            "binding connection"
        );
        self.connection = Some(connection);
    }

    pub fn datasource(&self) -> &str {
        &self.datasource
    }

    pub fn set_datasource(&mut self, datasource: impl Into<String>) {
        self.datasource = datasource.into();
    }

    pub fn dialect(&self) -> &dyn SchemaDialect {
        self.dialect.as_ref()
    }

    /// The bound connection, or `ConnectionNotBound`
    pub fn connection(&self) -> Result<&dyn Connection> {
        self.connection
            .as_deref()
            .ok_or_else(|| DdlError::ConnectionNotBound(self.datasource.clone()))
    }

    fn generated(&self, sql: String) -> String {
        tracing::debug!(dialect = self.dialect.name(), sql = %sql, "generated statement");
        sql
    }

    // Generation

    pub fn build_column(&self, column: &ColumnDefinition) -> Result<String> {
        let sql = build_column(self.dialect(), column)?;
        Ok(self.generated(sql))
    }

    pub fn create_table(
        &self,
        table: &str,
        definition: &TableDefinition,
        options: &TableOptions,
    ) -> Result<String> {
        let sql = create_table(self.dialect(), table, definition, options)?;
        Ok(self.generated(sql))
    }

    pub fn add_column(
        &self,
        table: &str,
        name: &str,
        column_type: &str,
        options: &ColumnOptions,
    ) -> Result<String> {
        let sql = alter::add_column(self.dialect(), table, name, column_type, options)?;
        Ok(self.generated(sql))
    }

    pub fn change_column(
        &self,
        table: &str,
        name: &str,
        column_type: &str,
        options: &ColumnOptions,
    ) -> Result<String> {
        let sql = self
            .dialect
            .change_column(table, name, column_type, options)?;
        Ok(self.generated(sql))
    }

    pub fn remove_column(&self, table: &str, column: &str) -> String {
        self.generated(alter::remove_column(table, column))
    }

    pub fn remove_columns<S: AsRef<str>>(&self, table: &str, columns: &[S]) -> String {
        self.generated(alter::remove_columns(table, columns))
    }

    pub fn rename_column(&self, table: &str, from: &str, to: &str) -> Result<String> {
        let sql = self.dialect.rename_column(table, from, to)?;
        Ok(self.generated(sql))
    }

    pub fn rename_table(&self, from: &str, to: &str) -> Result<String> {
        let sql = self.dialect.rename_table(from, to)?;
        Ok(self.generated(sql))
    }

    pub fn add_index(
        &self,
        table: &str,
        column: &str,
        name: &str,
        options: &IndexOptions,
    ) -> String {
        self.generated(alter::add_index(table, column, name, options))
    }

    pub fn remove_index(&self, table: &str, name: &str) -> Result<String> {
        let sql = self.dialect.remove_index(table, name)?;
        Ok(self.generated(sql))
    }

    pub fn rename_index(&self, table: &str, old_name: &str, new_name: &str) -> Result<String> {
        let sql = self.dialect.rename_index(table, old_name, new_name)?;
        Ok(self.generated(sql))
    }

    pub fn add_foreign_key(
        &self,
        from_table: &str,
        to_table: &str,
        options: &ForeignKeyOptions,
    ) -> String {
        self.generated(alter::add_foreign_key(from_table, to_table, options))
    }

    pub fn remove_foreign_key(&self, from_table: &str, constraint: &str) -> Result<String> {
        let sql = self.dialect.remove_foreign_key(from_table, constraint)?;
        Ok(self.generated(sql))
    }

    pub fn drop_table(&self, table: &str) -> String {
        self.generated(alter::drop_table(table))
    }

    /// Format a default value with the dialect's literal style
    pub fn column_value(&self, value: &Value) -> String {
        self.dialect.literal_style().column_value(value)
    }

    // Introspection

    #[tracing::instrument(skip(self), fields(datasource = %self.datasource))]
    pub async fn tables(&self) -> Result<Vec<String>> {
        self.connection()?.tables().await
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.tables().await?.iter().any(|t| t == table))
    }

    #[tracing::instrument(skip(self), fields(datasource = %self.datasource))]
    pub async fn schema(&self, table: &str) -> Result<TableSchema> {
        self.dialect.schema(self.connection()?, table).await
    }

    /// Column names of `table`, in table order
    pub async fn columns(&self, table: &str) -> Result<Vec<String>> {
        Ok(self.schema(table).await?.into_keys().collect())
    }

    pub async fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        Ok(self.schema(table).await?.contains_key(column))
    }

    #[tracing::instrument(skip(self), fields(datasource = %self.datasource))]
    pub async fn indexes(&self, table: &str) -> Result<Vec<IndexInfo>> {
        self.dialect.indexes(self.connection()?, table).await
    }

    #[tracing::instrument(skip(self), fields(datasource = %self.datasource))]
    pub async fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyInfo>> {
        self.dialect.foreign_keys(self.connection()?, table).await
    }

    /// True if a foreign key on `table` matches the lookup's column or
    /// constraint name
    pub async fn foreign_key_exists(&self, table: &str, lookup: &ForeignKeyLookup) -> Result<bool> {
        Ok(lookup.matches_any(&self.foreign_keys(table).await?))
    }

    #[tracing::instrument(skip(self), fields(datasource = %self.datasource))]
    pub async fn show_create_table(&self, table: &str) -> Result<String> {
        self.dialect.show_create_table(self.connection()?, table).await
    }
}
