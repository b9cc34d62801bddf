//! PostgreSQL schema introspection

use crate::PostgresDialect;
use ddlkit_core::{
    ColumnSchema, Connection, DdlError, ForeignKeyInfo, IndexInfo, Result, Row, TableSchema,
    quote_literal,
};
use ddlkit_schema::{
    NativeType, PRIMARY_KEY, SchemaDialect, TableDefinition, TableField, TableOptions,
    create_table,
};

/// information_schema spells types out in full; fold them onto the names
/// the type map uses.
fn native_type_name(data_type: &str) -> &str {
    match data_type {
        "character varying" => "varchar",
        "character" => "char",
        "numeric" => "decimal",
        "double precision" => "float",
        "timestamp without time zone" => "timestamp",
        "timestamp with time zone" => "timestamptz",
        "time without time zone" => "time",
        "time with time zone" => "timetz",
        other => other,
    }
}

fn native_type(row: &Row) -> NativeType {
    let name = native_type_name(row.get_str("data_type").unwrap_or("text")).to_string();
    let args = match name.as_str() {
        "varchar" | "char" => row
            .get_i64("character_maximum_length")
            .and_then(|l| u32::try_from(l).ok())
            .into_iter()
            .collect(),
        "decimal" => [row.get_i64("numeric_precision"), row.get_i64("numeric_scale")]
            .into_iter()
            .map_while(|arg| arg.and_then(|v| u32::try_from(v).ok()))
            .collect(),
        _ => Vec::new(),
    };
    NativeType { name, args }
}

/// Strip the cast PostgreSQL attaches to literal defaults:
/// `'draft'::character varying` -> `draft`, `NULL::text` -> none.
fn clean_default(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let value = if let Some(rest) = raw.strip_prefix('\'') {
        let end = rest.rfind('\'').unwrap_or(rest.len());
        rest[..end].replace("''", "'")
    } else {
        raw.split("::").next().unwrap_or(raw).to_string()
    };
    if value.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(value)
    }
}

/// Unquoted defaults other than numbers and booleans are expressions,
/// e.g. `now()` or `CURRENT_TIMESTAMP`.
fn is_expression_default(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.starts_with('\'') {
        return false;
    }
    let value = raw
        .split("::")
        .next()
        .unwrap_or(raw)
        .trim_matches(['(', ')']);
    value.parse::<f64>().is_err()
        && !value.eq_ignore_ascii_case("true")
        && !value.eq_ignore_ascii_case("false")
        && !value.eq_ignore_ascii_case("null")
}

/// Column list of an `indexdef`, e.g.
/// `CREATE UNIQUE INDEX users_email ON public.users USING btree (email)`
fn index_columns(indexdef: &str) -> Vec<String> {
    let start = indexdef
        .find(" USING ")
        .and_then(|using| indexdef[using..].find('(').map(|i| using + i))
        .or_else(|| indexdef.find('('));
    let (Some(start), Some(end)) = (start, indexdef.rfind(')')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }
    indexdef[start + 1..end]
        .split(',')
        .map(|column| column.trim().trim_matches('"').to_string())
        .filter(|column| !column.is_empty())
        .collect()
}

impl PostgresDialect {
    /// Serial columns (a `nextval(` default) are reported as `primaryKey`.
    /// Other primary key columns are not detected.
    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_schema(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<TableSchema> {
        let query = format!(
            "SELECT column_name, data_type, character_maximum_length, numeric_precision,
                    numeric_scale, is_nullable, column_default
             FROM information_schema.columns
             WHERE table_schema = current_schema() AND table_name = {}
             ORDER BY ordinal_position",
            quote_literal(table)
        );
        let rows = conn.fetch_rows(&query).await?;

        let mut schema = TableSchema::new();
        for row in &rows {
            let Some(name) = row.get_str("column_name") else {
                continue;
            };
            let raw_default = row.get_str("column_default");
            let serial = raw_default.is_some_and(|d| d.to_lowercase().contains("nextval("));

            let mut column = if serial {
                let mut column = ColumnSchema::new(PRIMARY_KEY);
                column.key = true;
                column
            } else {
                let mut column = self.type_map().column_schema(&native_type(row));
                column.default = raw_default.and_then(clean_default);
                column.default_expression = raw_default.is_some_and(is_expression_default);
                column
            };
            column.null = row.get_str("is_nullable") == Some("YES");

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
        let query = format!(
            "SELECT indexname, indexdef
             FROM pg_indexes
             WHERE schemaname = current_schema() AND tablename = {}
             ORDER BY indexname",
            quote_literal(table)
        );
        let rows = conn.fetch_rows(&query).await?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let name = row.get_str("indexname")?;
                let indexdef = row.get_str("indexdef").unwrap_or_default();
                Some(IndexInfo {
                    table: table.to_string(),
                    name: name.to_string(),
                    columns: index_columns(indexdef),
                    unique: indexdef.contains("UNIQUE INDEX"),
                })
            })
            .collect())
    }

    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_foreign_keys(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>> {
        let query = format!(
            "SELECT
                tc.constraint_name AS constraint_name,
                tc.table_name AS table_name,
                kcu.column_name AS column_name,
                ccu.table_name AS referenced_table_name,
                ccu.column_name AS referenced_column_name
             FROM information_schema.table_constraints AS tc
             JOIN information_schema.key_column_usage AS kcu
               ON tc.constraint_name = kcu.constraint_name
              AND tc.table_schema = kcu.table_schema
             JOIN information_schema.constraint_column_usage AS ccu
               ON ccu.constraint_name = tc.constraint_name
              AND ccu.table_schema = tc.table_schema
             WHERE tc.constraint_type = 'FOREIGN KEY'
               AND tc.table_schema = current_schema()
               AND tc.table_name = {}
             ORDER BY tc.constraint_name, kcu.ordinal_position",
            quote_literal(table)
        );

        let rows = conn.fetch_rows(&query).await?;
        Ok(rows.iter().filter_map(ForeignKeyInfo::from_row).collect())
    }

    /// PostgreSQL has no `SHOW CREATE TABLE`; rebuild it from the schema.
    /// Expression defaults are left out of the rebuilt statement.
    #[tracing::instrument(skip(self, conn))]
    pub(crate) async fn read_create_table(
        &self,
        conn: &dyn Connection,
        table: &str,
    ) -> Result<String> {
        let schema = self.read_schema(conn, table).await?;
        if schema.is_empty() {
            return Err(DdlError::NotFound(format!("Table '{}' not found", table)));
        }

        let definition: TableDefinition = schema
            .iter()
            .map(|(name, column)| (name.clone(), TableField::from(column)))
            .collect();
        create_table(self, table, &definition, &TableOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_default() {
        assert_eq!(
            clean_default("'draft'::character varying").as_deref(),
            Some("draft")
        );
        assert_eq!(clean_default("'it''s'::text").as_deref(), Some("it's"));
        assert_eq!(clean_default("0").as_deref(), Some("0"));
        assert_eq!(clean_default("now()").as_deref(), Some("now()"));
        assert_eq!(clean_default("NULL::character varying"), None);
    }

    #[test]
    fn test_is_expression_default() {
        assert!(is_expression_default("now()"));
        assert!(is_expression_default("CURRENT_TIMESTAMP"));
        assert!(is_expression_default("gen_random_uuid()"));
        assert!(!is_expression_default("'draft'::character varying"));
        assert!(!is_expression_default("0"));
        assert!(!is_expression_default("(-1)"));
        assert!(!is_expression_default("1.5::numeric"));
        assert!(!is_expression_default("true"));
        assert!(!is_expression_default("NULL::text"));
    }

    #[test]
    fn test_index_columns() {
        assert_eq!(
            index_columns("CREATE UNIQUE INDEX users_pkey ON public.users USING btree (id)"),
            vec!["id"]
        );
        assert_eq!(
            index_columns(
                "CREATE INDEX idx_name ON public.users USING btree (first_name, \"Last\")"
            ),
            vec!["first_name", "Last"]
        );
        assert!(index_columns("garbage").is_empty());
    }

    #[test]
    fn test_native_type_from_row() {
        let row = Row::from_pairs([
            ("data_type", ddlkit_core::Value::from("numeric")),
            ("numeric_precision", ddlkit_core::Value::from(12)),
            ("numeric_scale", ddlkit_core::Value::from(2)),
        ]);
        assert_eq!(
            native_type(&row),
            NativeType {
                name: "decimal".into(),
                args: vec![12, 2]
            }
        );

        let row = Row::from_pairs([("data_type", "timestamp without time zone")]);
        assert_eq!(native_type(&row).name, "timestamp");
    }
}
