//! SQLite schema introspection via PRAGMAs

use crate::SqliteDialect;
use ddlkit_core::{
    ColumnSchema, Connection, DdlError, ForeignKeyInfo, IndexInfo, Result, TableSchema,
    quote_literal,
};
use ddlkit_schema::{NativeType, PRIMARY_KEY, SchemaDialect};

/// `dflt_value` holds the default as SQL text: `'draft'`, `0`, `NULL`
fn parse_default(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("null") {
        return None;
    }
    match raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        Some(text) => Some(text.replace("''", "'")),
        None => Some(raw.to_string()),
    }
}

/// `CURRENT_TIMESTAMP`, `(datetime('now'))` and the like
fn is_expression_default(raw: &str) -> bool {
    let raw = raw.trim();
    !raw.starts_with('\'') && !raw.eq_ignore_ascii_case("null") && raw.parse::<f64>().is_err()
}

impl SqliteDialect {
    /// A sole INTEGER primary key column aliases the rowid and is reported
    /// as `primaryKey`.
    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_schema(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<TableSchema> {
        tracing::trace!(table = %table, "fetching column information");
        let rows = conn
            .fetch_rows(&format!("PRAGMA table_info({})", quote_literal(table)))
            .await?;

        let key_columns = rows
            .iter()
            .filter(|row| row.get_i64("pk").unwrap_or(0) > 0)
            .count();

        let mut schema = TableSchema::new();
        for row in &rows {
            let Some(name) = row.get_str("name") else {
                continue;
            };
            let declared = row.get_str("type").unwrap_or("TEXT");
            let key = row.get_i64("pk").unwrap_or(0) > 0;
            let native = NativeType::parse(declared);

            let mut column = if key && key_columns == 1 && native.name == "integer" {
                ColumnSchema::new(PRIMARY_KEY)
            } else {
                let mut column = self.type_map().column_schema(&native);
                let raw_default = row.get_str("dflt_value");
                column.default = raw_default.and_then(parse_default);
                column.default_expression = raw_default.is_some_and(is_expression_default);
                column
            };
            column.null = !key && row.get_i64("notnull").unwrap_or(0) == 0;
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
        tracing::trace!(table = %table, "fetching index information");
        let list = conn
            .fetch_rows(&format!("PRAGMA index_list({})", quote_literal(table)))
            .await?;

        let mut indexes = Vec::with_capacity(list.len());
        for row in &list {
            let Some(name) = row.get_str("name") else {
                continue;
            };
            let info = conn
                .fetch_rows(&format!("PRAGMA index_info({})", quote_literal(name)))
                .await?;
            let columns = info
                .iter()
                .filter_map(|r| r.get_str("name").map(str::to_string))
                .collect();

            indexes.push(IndexInfo {
                table: table.to_string(),
                name: name.to_string(),
                columns,
                unique: row.get_i64("unique") == Some(1),
            });
        }

        Ok(indexes)
    }

    /// SQLite does not name foreign keys; names are synthesized as
    /// `fk_<table>_<column>`.
    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_foreign_keys(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>> {
        tracing::trace!(table = %table, "fetching foreign key information");
        let rows = conn
            .fetch_rows(&format!("PRAGMA foreign_key_list({})", quote_literal(table)))
            .await?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let column = row.get_str("from")?;
                Some(ForeignKeyInfo {
                    constraint_name: format!("fk_{}_{}", table, column),
                    table_name: table.to_string(),
                    column_name: column.to_string(),
                    referenced_table_name: row.get_str("table")?.to_string(),
                    referenced_column_name: row.get_str("to")?.to_string(),
                })
            })
            .collect())
    }

    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_create_table(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<String> {
        let query = format!(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = {}",
            quote_literal(table)
        );
        conn.fetch_row(&query)
            .await?
            .and_then(|row| row.get_str("sql").map(str::to_string))
            .ok_or_else(|| DdlError::NotFound(format!("Table '{}' not found", table)))
    }
}
