//! Introspection record types
//!
//! These are what a dialect hands back after reading the live schema.

use crate::Row;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One column of an existing table, in ddlkit's logical vocabulary where the
/// native type could be mapped back, or the native type name otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnSchema {
    #[serde(rename = "type")]
    pub column_type: String,
    pub limit: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub default: Option<String>,
    /// `default` is an SQL expression such as `now()` rather than a literal
    #[serde(default)]
    pub default_expression: bool,
    pub null: bool,
    /// Whether the column is part of the primary key
    pub key: bool,
}

impl ColumnSchema {
    pub fn new(column_type: impl Into<String>) -> Self {
        Self {
            column_type: column_type.into(),
            ..Default::default()
        }
    }
}

/// Columns of a table keyed by name, in table order
pub type TableSchema = IndexMap<String, ColumnSchema>;

/// Index information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub table: String,
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

/// Foreign key information, one entry per constrained column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyInfo {
    pub constraint_name: String,
    pub table_name: String,
    pub column_name: String,
    pub referenced_table_name: String,
    pub referenced_column_name: String,
}

impl ForeignKeyInfo {
    /// Read a key from a row labelled `constraint_name`, `table_name`,
    /// `column_name`, `referenced_table_name` and `referenced_column_name`.
    /// Returns `None` when any label is missing or NULL.
    pub fn from_row(row: &Row) -> Option<Self> {
        Some(Self {
            constraint_name: row.get_str("constraint_name")?.to_string(),
            table_name: row.get_str("table_name")?.to_string(),
            column_name: row.get_str("column_name")?.to_string(),
            referenced_table_name: row.get_str("referenced_table_name")?.to_string(),
            referenced_column_name: row.get_str("referenced_column_name")?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_foreign_key_from_row() {
        let row = Row::from_pairs([
            ("CONSTRAINT_NAME", "fk_posts_user"),
            ("TABLE_NAME", "posts"),
            ("COLUMN_NAME", "user_id"),
            ("REFERENCED_TABLE_NAME", "users"),
            ("REFERENCED_COLUMN_NAME", "id"),
        ]);
        assert_eq!(
            ForeignKeyInfo::from_row(&row),
            Some(ForeignKeyInfo {
                constraint_name: "fk_posts_user".into(),
                table_name: "posts".into(),
                column_name: "user_id".into(),
                referenced_table_name: "users".into(),
                referenced_column_name: "id".into(),
            })
        );
    }

    #[test]
    fn test_foreign_key_from_incomplete_row() {
        let row = Row::from_pairs([("constraint_name", "fk_a"), ("column_name", "a_id")]);
        assert_eq!(ForeignKeyInfo::from_row(&row), None);
    }

    #[test]
    fn test_column_schema_defaults() {
        let column = ColumnSchema::new("string");
        assert_eq!(column.column_type, "string");
        assert!(!column.null);
        assert!(!column.key);
        assert!(!column.default_expression);
        assert_eq!(column.limit, None);
    }
}
