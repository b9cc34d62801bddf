//! PostgreSQL type map, identifier quoting and alter syntax

use async_trait::async_trait;
use ddlkit_core::{Connection, ForeignKeyInfo, IndexInfo, Result, TableSchema};
use ddlkit_schema::{
    ColumnDefinition, ColumnOptions, DialectSettings, PRIMARY_KEY, ResolvedColumn, SchemaDialect,
    TypeMap, TypeMapping,
};

/// Built-in PostgreSQL type mappings
pub fn postgres_type_map() -> TypeMap {
    TypeMap::new()
        .with(PRIMARY_KEY, TypeMapping::new("SERIAL NOT NULL"))
        .with("string", TypeMapping::new("VARCHAR").limit(255))
        .with("text", TypeMapping::new("TEXT"))
        .with("integer", TypeMapping::new("INTEGER"))
        .with("bigint", TypeMapping::new("BIGINT"))
        .with("float", TypeMapping::new("FLOAT"))
        .with("decimal", TypeMapping::new("DECIMAL").precision(10).scale(0))
        .with("datetime", TypeMapping::new("TIMESTAMP"))
        .with("time", TypeMapping::new("TIME"))
        .with("timestamp", TypeMapping::new("TIMESTAMP"))
        .with("date", TypeMapping::new("DATE"))
        .with("binary", TypeMapping::new("BYTEA"))
        .with("boolean", TypeMapping::new("BOOLEAN"))
}

#[derive(Debug, Clone)]
pub struct PostgresDialect {
    settings: DialectSettings,
}

impl PostgresDialect {
    pub fn new() -> Self {
        Self::with_settings(DialectSettings::new(postgres_type_map()))
    }

    pub fn with_settings(settings: DialectSettings) -> Self {
        Self { settings }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

/// Unquoted identifiers are folded to lower case, so anything that is not
/// already a plain lower-case identifier needs double quotes.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[async_trait]
impl SchemaDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn settings(&self) -> &DialectSettings {
        &self.settings
    }

    fn quote_column_name(&self, name: &str) -> String {
        if is_plain_identifier(name) {
            name.to_string()
        } else {
            format!("\"{}\"", name.replace('"', "\"\""))
        }
    }

    /// `ALTER COLUMN ... TYPE`, followed by `SET DEFAULT` and
    /// `SET NOT NULL` / `DROP NOT NULL` actions when requested
    fn change_column(
        &self,
        table: &str,
        name: &str,
        column_type: &str,
        options: &ColumnOptions,
    ) -> Result<String> {
        let column = ColumnDefinition::new(name, column_type).with_options(options.clone());
        let resolved = ResolvedColumn::resolve(self.type_map(), &column)?;
        let name = self.quote_column_name(&resolved.name);

        let mut sql = format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {}",
            table,
            name,
            resolved.type_clause()
        );
        if let Some(default) = &resolved.default {
            sql.push_str(&format!(
                ", ALTER COLUMN {} SET DEFAULT {}",
                name,
                self.literal_style().column_value(default)
            ));
        }
        match resolved.null {
            Some(false) => sql.push_str(&format!(", ALTER COLUMN {} SET NOT NULL", name)),
            Some(true) => sql.push_str(&format!(", ALTER COLUMN {} DROP NOT NULL", name)),
            None => {}
        }
        Ok(sql)
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

    fn rename_index(&self, _table: &str, old_name: &str, new_name: &str) -> Result<String> {
        Ok(format!("ALTER INDEX {} RENAME TO {}", old_name, new_name))
    }

    fn remove_foreign_key(&self, from_table: &str, constraint: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            from_table, constraint
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
