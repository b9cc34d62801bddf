//! SQLite type map and alter syntax
//!
//! SQLite's `ALTER TABLE` cannot redefine a column, rename an index or drop
//! a constraint; those operations return `UnsupportedOperation`.

use async_trait::async_trait;
use ddlkit_core::{Connection, DdlError, ForeignKeyInfo, IndexInfo, Result, TableSchema};
use ddlkit_schema::{
    ColumnOptions, DialectSettings, PRIMARY_KEY, SchemaDialect, TypeMap, TypeMapping,
};

/// Built-in SQLite type mappings
pub fn sqlite_type_map() -> TypeMap {
    TypeMap::new()
        .with(PRIMARY_KEY, TypeMapping::new("INTEGER"))
        .with("string", TypeMapping::new("VARCHAR").limit(255))
        .with("text", TypeMapping::new("TEXT"))
        .with("integer", TypeMapping::new("INTEGER"))
        .with("bigint", TypeMapping::new("BIGINT"))
        .with("float", TypeMapping::new("FLOAT"))
        .with("decimal", TypeMapping::new("DECIMAL").precision(10).scale(0))
        .with("datetime", TypeMapping::new("DATETIME"))
        .with("date", TypeMapping::new("DATE"))
        .with("time", TypeMapping::new("TIME"))
        .with("timestamp", TypeMapping::new("TIMESTAMP"))
        .with("binary", TypeMapping::new("BLOB"))
        .with("boolean", TypeMapping::new("BOOLEAN"))
}

#[derive(Debug, Clone)]
pub struct SqliteDialect {
    settings: DialectSettings,
}

impl SqliteDialect {
    pub fn new() -> Self {
        Self::with_settings(DialectSettings::new(sqlite_type_map()))
    }

    pub fn with_settings(settings: DialectSettings) -> Self {
        Self { settings }
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn settings(&self) -> &DialectSettings {
        &self.settings
    }

    fn change_column(
        &self,
        _table: &str,
        _name: &str,
        _column_type: &str,
        _options: &ColumnOptions,
    ) -> Result<String> {
        Err(DdlError::unsupported(self.name(), "changeColumn"))
    }

    fn rename_column(&self, table: &str, from: &str, to: &str) -> Result<String> {
        Ok(format!("ALTER TABLE {} RENAME COLUMN {} TO {}", table, from, to))
    }

    fn rename_table(&self, from: &str, to: &str) -> Result<String> {
        Ok(format!("ALTER TABLE {} RENAME TO {}", from, to))
    }

    fn remove_index(&self, _table: &str, name: &str) -> Result<String> {
        Ok(format!("DROP INDEX {}", name))
    }

    fn rename_index(&self, _table: &str, _old_name: &str, _new_name: &str) -> Result<String> {
        Err(DdlError::unsupported(self.name(), "renameIndex"))
    }

    fn remove_foreign_key(&self, _from_table: &str, _constraint: &str) -> Result<String> {
        Err(DdlError::unsupported(self.name(), "removeForeignKey"))
    }

    async fn schema(&self, conn: &dyn Connection, table: &str) -> Result<TableSchema> {
        self.read_schema(conn, table).await
    }

    async fn indexes(&self, conn: &dyn Connection, table: &str) -> Result<Vec<IndexInfo>> {
        self.read_indexes(conn, table).await
    }

    async fn foreign_keys(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>> {
        self.read_foreign_keys(conn, table).await
    }

    async fn show_create_table(&self, conn: &dyn Connection, table: &str) -> Result<String> {
        self.read_create_table(conn, table).await
    }
}
