//! MySQL schema introspection

use crate::MySqlDialect;
use ddlkit_core::{
    ColumnSchema, Connection, DdlError, ForeignKeyInfo, IndexInfo, Result, TableSchema,
    quote_literal,
};
use ddlkit_schema::{NativeType, PRIMARY_KEY, SchemaDialect};
use indexmap::IndexMap;

/// Backtick-quote a table name for SHOW statements
fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

impl MySqlDialect {
    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_schema(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<TableSchema> {
        let rows = conn
            .fetch_rows(&format!("SHOW FULL COLUMNS FROM {}", quote_identifier(table)))
            .await?;

        let mut schema = TableSchema::new();
        for row in rows {
            let Some(name) = row.get_str("Field") else {
                continue;
            };
            let native = NativeType::parse(row.get_str("Type").unwrap_or_default());
            let key = row.get_str("Key") == Some("PRI");
            let auto_increment = row
                .get_str("Extra")
                .is_some_and(|extra| extra.to_lowercase().contains("auto_increment"));

            let mut column = if key && auto_increment {
                ColumnSchema::new(PRIMARY_KEY)
            } else {
                self.type_map().column_schema(&native)
            };
            column.null = row.get_str("Null") == Some("YES");
            column.default = row
                .get_by_name("Default")
                .filter(|v| !v.is_null())
                .map(|v| v.to_string());
            column.key = key;

            schema.insert(name.to_string(), column);
        }

        Ok(schema)
    }

    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_indexes(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<Vec<IndexInfo>> {
        let rows = conn
            .fetch_rows(&format!("SHOW INDEX FROM {}", quote_identifier(table)))
            .await?;

        // One row per indexed column, in Seq_in_index order
        let mut indexes: IndexMap<String, IndexInfo> = IndexMap::new();
        for row in &rows {
            let (Some(name), Some(column)) = (row.get_str("Key_name"), row.get_str("Column_name"))
            else {
                continue;
            };
            let unique = row.get_i64("Non_unique") == Some(0);
            indexes
                .entry(name.to_string())
                .or_insert_with(|| IndexInfo {
                    table: table.to_string(),
                    name: name.to_string(),
                    columns: Vec::new(),
                    unique,
                })
                .columns
                .push(column.to_string());
        }

        Ok(indexes.into_values().collect())
    }

    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_foreign_keys(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>> {
        let query = format!(
            "SELECT
                CONSTRAINT_NAME AS constraint_name,
                TABLE_NAME AS table_name,
                COLUMN_NAME AS column_name,
                REFERENCED_TABLE_NAME AS referenced_table_name,
                REFERENCED_COLUMN_NAME AS referenced_column_name
             FROM information_schema.KEY_COLUMN_USAGE
             WHERE TABLE_SCHEMA = DATABASE()
               AND TABLE_NAME = {}
               AND REFERENCED_TABLE_NAME IS NOT NULL
             ORDER BY CONSTRAINT_NAME, ORDINAL_POSITION",
            quote_literal(table)
        );

        let rows = conn.fetch_rows(&query).await?;
        Ok(rows.iter().filter_map(ForeignKeyInfo::from_row).collect())
    }

    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_create_table(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<String> {
        conn.fetch_row(&format!("SHOW CREATE TABLE {}", quote_identifier(table)))
            .await?
            .and_then(|row| row.get_str("Create Table").map(str::to_string))
            .ok_or_else(|| DdlError::NotFound(format!("Table '{}' not found", table)))
    }
}
