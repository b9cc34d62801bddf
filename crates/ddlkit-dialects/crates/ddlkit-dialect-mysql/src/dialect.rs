//! MySQL type map and alter syntax

use async_trait::async_trait;
use ddlkit_core::{Connection, ForeignKeyInfo, IndexInfo, Result, TableSchema};
use ddlkit_schema::{
    ColumnDefinition, ColumnOptions, DialectSettings, PRIMARY_KEY, SchemaDialect, TypeMap,
    TypeMapping, build_column,
};

/// Built-in MySQL type mappings
pub fn mysql_type_map() -> TypeMap {
    TypeMap::new()
        .with(PRIMARY_KEY, TypeMapping::new("INT NOT NULL AUTO_INCREMENT"))
        .with("string", TypeMapping::new("VARCHAR").limit(255))
        .with("text", TypeMapping::new("TEXT"))
        .with("integer", TypeMapping::new("INT").limit(11))
        .with("bigint", TypeMapping::new("BIGINT").limit(20))
        .with("float", TypeMapping::new("FLOAT").precision(10).scale(0))
        .with("decimal", TypeMapping::new("DECIMAL").precision(10).scale(0))
        .with("datetime", TypeMapping::new("DATETIME"))
        .with("date", TypeMapping::new("DATE"))
        .with("time", TypeMapping::new("TIME"))
        .with("timestamp", TypeMapping::new("TIMESTAMP"))
        .with("binary", TypeMapping::new("BLOB"))
        .with("boolean", TypeMapping::new("TINYINT").limit(1))
}

/// MySQL and MariaDB
#[derive(Debug, Clone)]
pub struct MySqlDialect {
    settings: DialectSettings,
}

impl MySqlDialect {
    pub fn new() -> Self {
        Self::with_settings(DialectSettings::new(mysql_type_map()))
    }

    pub fn with_settings(settings: DialectSettings) -> Self {
        Self { settings }
    }
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn settings(&self) -> &DialectSettings {
        &self.settings
    }

    fn change_column(
        &self,
        table: &str,
        name: &str,
        column_type: &str,
        options: &ColumnOptions,
    ) -> Result<String> {
        let column = ColumnDefinition::new(name, column_type).with_options(options.clone());
        Ok(format!(
            "ALTER TABLE {} MODIFY COLUMN {}",
            table,
            build_column(self, &column)?
        ))
    }

    fn rename_column(&self, table: &str, from: &str, to: &str) -> Result<String> {
        Ok(format!("ALTER TABLE {} RENAME COLUMN {} TO {}", table, from, to))
    }

    fn rename_table(&self, from: &str, to: &str) -> Result<String> {
        Ok(format!("RENAME TABLE {} TO {}", from, to))
    }

    fn remove_index(&self, table: &str, name: &str) -> Result<String> {
        Ok(format!("DROP INDEX {} ON {}", name, table))
    }

    fn rename_index(&self, table: &str, old_name: &str, new_name: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME INDEX {} TO {}",
            table, old_name, new_name
        ))
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
