//! ALTER TABLE, index and foreign key statements shared by all dialects
//!
//! Statements whose syntax differs per engine (changing or renaming columns,
//! renaming tables, dropping or renaming indexes) live on `SchemaDialect`.

use crate::{ColumnDefinition, ColumnOptions, SchemaDialect, build_column};
use ddlkit_core::{ForeignKeyInfo, Result};
use serde::{Deserialize, Serialize};

/// `ALTER TABLE <table> ADD COLUMN <definition>`
pub fn add_column<D>(
    dialect: &D,
    table: &str,
    name: &str,
    column_type: &str,
    options: &ColumnOptions,
) -> Result<String>
where
    D: SchemaDialect + ?Sized,
{
    let column = ColumnDefinition::new(name, column_type).with_options(options.clone());
    let definition = build_column(dialect, &column)?;
    Ok(format!("ALTER TABLE {} ADD COLUMN {}", table, definition))
}

pub fn remove_column(table: &str, column: &str) -> String {
    format!("ALTER TABLE {} DROP COLUMN {}", table, column)
}

/// Drop several columns in one statement, one `DROP COLUMN` per line
pub fn remove_columns<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    let mut sql = format!("ALTER TABLE {}", table);
    let drops: Vec<String> = columns
        .iter()
        .map(|column| format!("\nDROP COLUMN {}", column.as_ref()))
        .collect();
    sql.push_str(&drops.join(","));
    sql
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOptions {
    #[serde(default)]
    pub unique: bool,
}

impl IndexOptions {
    pub fn unique() -> Self {
        Self { unique: true }
    }
}

/// `CREATE [UNIQUE ]INDEX <name> ON <table> (<column>)`
pub fn add_index(table: &str, column: &str, name: &str, options: &IndexOptions) -> String {
    let unique = if options.unique { "UNIQUE " } else { "" };
    format!("CREATE {}INDEX {} ON {} ({})", unique, name, table, column)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyOptions {
    /// Constraint name
    pub name: String,
    /// Referencing column on the `from` table
    pub column: String,
    /// Referenced column on the `to` table
    #[serde(rename = "primaryKey")]
    pub primary_key: String,
}

impl ForeignKeyOptions {
    pub fn new(
        name: impl Into<String>,
        column: impl Into<String>,
        primary_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            primary_key: primary_key.into(),
        }
    }
}

pub fn add_foreign_key(from_table: &str, to_table: &str, options: &ForeignKeyOptions) -> String {
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        from_table, options.name, options.column, to_table, options.primary_key
    )
}

/// MySQL-family form; dialects with other syntax override
/// `SchemaDialect::remove_foreign_key`.
pub fn remove_foreign_key(from_table: &str, constraint: &str) -> String {
    format!("ALTER TABLE {} DROP FOREIGN KEY {}", from_table, constraint)
}

pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE {}", table)
}

/// Criteria for `foreign_key_exists`: a column name, a constraint name, or both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyLookup {
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ForeignKeyLookup {
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            name: None,
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            column: None,
            name: Some(name.into()),
        }
    }

    /// True if any key matches the column or the constraint name
    pub fn matches_any(&self, foreign_keys: &[ForeignKeyInfo]) -> bool {
        let column = self.column.as_deref().filter(|c| !c.is_empty());
        let name = self.name.as_deref().filter(|n| !n.is_empty());
        foreign_keys.iter().any(|fk| {
            column.is_some_and(|c| fk.column_name == c)
                || name.is_some_and(|n| fk.constraint_name == n)
        })
    }
}
