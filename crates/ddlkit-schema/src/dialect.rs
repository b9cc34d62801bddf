//! The capability set every dialect implements

use crate::{ColumnOptions, LiteralStyle, TypeMap, TypeMapping, alter};
use async_trait::async_trait;
use ddlkit_core::{Connection, ForeignKeyInfo, IndexInfo, Result, TableSchema};
use indexmap::IndexMap;

/// Configurable parts of a dialect: its type map and literal style
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialectSettings {
    pub type_map: TypeMap,
    pub literal_style: LiteralStyle,
}

impl DialectSettings {
    pub fn new(type_map: TypeMap) -> Self {
        Self {
            type_map,
            literal_style: LiteralStyle::default(),
        }
    }

    pub fn with_literal_style(mut self, literal_style: LiteralStyle) -> Self {
        self.literal_style = literal_style;
        self
    }

    /// Replace type mappings with configured overrides
    pub fn with_type_overrides(mut self, overrides: &IndexMap<String, TypeMapping>) -> Self {
        self.type_map = self.type_map.merge(overrides);
        self
    }
}

/// A SQL dialect.
///
/// Each engine supplies its type map, the alter statements whose syntax
/// differs between engines, and the introspection primitives. The shared
/// statements (`build_column`, `create_table`, the `alter` module) and the
/// derived helpers on `SchemaBuilder` are built on top of this.
///
/// Operations an engine cannot express return
/// `DdlError::UnsupportedOperation`.
#[async_trait]
pub trait SchemaDialect: Send + Sync {
    /// Dialect identifier, e.g. "mysql"
    fn name(&self) -> &'static str;

    fn settings(&self) -> &DialectSettings;

    fn type_map(&self) -> &TypeMap {
        &self.settings().type_map
    }

    fn literal_style(&self) -> LiteralStyle {
        self.settings().literal_style
    }

    /// Render a column name inside a column definition
    fn quote_column_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Redefine an existing column
    fn change_column(
        &self,
        table: &str,
        name: &str,
        column_type: &str,
        options: &ColumnOptions,
    ) -> Result<String>;

    fn rename_column(&self, table: &str, from: &str, to: &str) -> Result<String>;

    fn rename_table(&self, from: &str, to: &str) -> Result<String>;

    fn remove_index(&self, table: &str, name: &str) -> Result<String>;

    fn rename_index(&self, table: &str, old_name: &str, new_name: &str) -> Result<String>;

    /// Drop a foreign key constraint. Defaults to the MySQL-family form.
    fn remove_foreign_key(&self, from_table: &str, constraint: &str) -> Result<String> {
        Ok(alter::remove_foreign_key(from_table, constraint))
    }

    /// Columns of `table`, in table order
    async fn schema(&self, conn: &dyn Connection, table: &str) -> Result<TableSchema>;

    async fn indexes(&self, conn: &dyn Connection, table: &str) -> Result<Vec<IndexInfo>>;

    async fn foreign_keys(&self, conn: &dyn Connection, table: &str)
    -> Result<Vec<ForeignKeyInfo>>;

    /// The `CREATE TABLE` statement for an existing table
    async fn show_create_table(&self, conn: &dyn Connection, table: &str) -> Result<String>;
}
