//! Minimal dialect used by this crate's tests

use crate::{
    ColumnDefinition, ColumnOptions, DialectSettings, PRIMARY_KEY, SchemaDialect, TypeMap,
    TypeMapping, build_column,
};
use async_trait::async_trait;
use ddlkit_core::{
    ColumnSchema, Connection, DdlError, ForeignKeyInfo, IndexInfo, Result, TableSchema,
    quote_literal,
};

pub fn generic_type_map() -> TypeMap {
    TypeMap::new()
        .with(PRIMARY_KEY, TypeMapping::new("SERIAL NOT NULL"))
        .with("string", TypeMapping::new("varchar").limit(255))
        .with("text", TypeMapping::new("text"))
        .with("integer", TypeMapping::new("integer"))
        .with("bigint", TypeMapping::new("bigint"))
        .with("float", TypeMapping::new("float").precision(8))
        .with("decimal", TypeMapping::new("decimal").precision(10).scale(0))
        .with("datetime", TypeMapping::new("timestamp"))
        .with("boolean", TypeMapping::new("boolean"))
}

pub struct GenericDialect {
    settings: DialectSettings,
}

impl GenericDialect {
    pub fn new() -> Self {
        Self::with_settings(DialectSettings::new(generic_type_map()))
    }

    pub fn with_settings(settings: DialectSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SchemaDialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
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
            "ALTER TABLE {} ALTER COLUMN {}",
            table,
            build_column(self, &column)?
        ))
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

    async fn schema(&self, conn: &dyn Connection, table: &str) -> Result<TableSchema> {
        let rows = conn
            .fetch_rows(&format!("DESCRIBE {}", quote_literal(table)))
            .await?;
        let mut schema = TableSchema::new();
        for row in rows {
            let Some(name) = row.get_str("name") else {
                continue;
            };
            let mut column = ColumnSchema::new(row.get_str("type").unwrap_or("text"));
            column.null = row.get_str("null") == Some("YES");
            schema.insert(name.to_string(), column);
        }
        Ok(schema)
    }

    async fn indexes(&self, conn: &dyn Connection, table: &str) -> Result<Vec<IndexInfo>> {
        let rows = conn
            .fetch_rows(&format!("LIST INDEXES {}", quote_literal(table)))
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(IndexInfo {
                    table: table.to_string(),
                    name: row.get_str("name")?.to_string(),
                    columns: vec![row.get_str("column")?.to_string()],
                    unique: row.get_i64("unique") == Some(1),
                })
            })
            .collect())
    }

    async fn foreign_keys(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>> {
        let rows = conn
            .fetch_rows(&format!("LIST FOREIGN KEYS {}", quote_literal(table)))
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(ForeignKeyInfo {
                    constraint_name: row.get_str("constraint_name")?.to_string(),
                    table_name: table.to_string(),
                    column_name: row.get_str("column_name")?.to_string(),
                    referenced_table_name: row.get_str("referenced_table_name")?.to_string(),
                    referenced_column_name: row.get_str("referenced_column_name")?.to_string(),
                })
            })
            .collect())
    }

    async fn show_create_table(&self, conn: &dyn Connection, table: &str) -> Result<String> {
        conn.fetch_row(&format!("SHOW CREATE {}", quote_literal(table)))
            .await?
            .and_then(|row| row.get_str("sql").map(str::to_string))
            .ok_or_else(|| DdlError::NotFound(format!("Table '{}' not found", table)))
    }
}
