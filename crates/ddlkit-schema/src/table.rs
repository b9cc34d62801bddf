//! Table definitions and `CREATE TABLE` generation

use crate::{ColumnDefinition, PRIMARY_KEY, SchemaDialect};
use ddlkit_core::{ColumnSchema, DdlError, Result, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of a table definition: either a bare logical type
/// (`"string"`) or a full column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableField {
    Shorthand(String),
    Definition(ColumnDefinition),
}

impl TableField {
    /// Expand shorthand into a full definition
    pub fn to_definition(&self) -> ColumnDefinition {
        match self {
            TableField::Shorthand(column_type) => ColumnDefinition::of_type(column_type.clone()),
            TableField::Definition(definition) => definition.clone(),
        }
    }

    /// Marked `key = true` or typed with the `primaryKey` sentinel
    fn is_primary_key(&self) -> bool {
        match self {
            TableField::Shorthand(column_type) => column_type == PRIMARY_KEY,
            TableField::Definition(d) => {
                d.options.key == Some(true) || d.column_type.as_deref() == Some(PRIMARY_KEY)
            }
        }
    }
}

impl From<&str> for TableField {
    fn from(column_type: &str) -> Self {
        TableField::Shorthand(column_type.to_string())
    }
}

impl From<String> for TableField {
    fn from(column_type: String) -> Self {
        TableField::Shorthand(column_type)
    }
}

impl From<ColumnDefinition> for TableField {
    fn from(definition: ColumnDefinition) -> Self {
        TableField::Definition(definition)
    }
}

impl From<&ColumnSchema> for TableField {
    fn from(column: &ColumnSchema) -> Self {
        if column.column_type == PRIMARY_KEY {
            return TableField::Shorthand(PRIMARY_KEY.to_string());
        }
        let mut definition = ColumnDefinition::of_type(column.column_type.clone());
        definition.options.limit = column.limit;
        definition.options.precision = column.precision;
        definition.options.scale = column.scale;
        // Expression defaults cannot pass through the quoted DEFAULT clause
        if !column.default_expression {
            definition.options.default = column.default.clone().map(Value::String);
        }
        definition.options.null = Some(column.null);
        if column.key {
            definition.options.key = Some(true);
        }
        TableField::Definition(definition)
    }
}

/// Ordered field name -> field mapping. Order is column order and primary
/// key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableDefinition {
    fields: IndexMap<String, TableField>,
}

impl TableDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    pub fn column(mut self, name: impl Into<String>, field: impl Into<TableField>) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: impl Into<TableField>) {
        self.fields.insert(name.into(), field.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableField)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, F: Into<TableField>> FromIterator<(K, F)> for TableDefinition {
    fn from_iter<T: IntoIterator<Item = (K, F)>>(iter: T) -> Self {
        let mut definition = TableDefinition::new();
        for (name, field) in iter {
            definition.insert(name, field);
        }
        definition
    }
}

/// Options for `create_table`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Raw text appended after the closing parenthesis, e.g.
    /// `ENGINE=InnoDB DEFAULT CHARSET=utf8mb4`. Passed through unchecked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl TableOptions {
    pub fn raw(options: impl Into<String>) -> Self {
        Self {
            options: Some(options.into()),
        }
    }
}

/// Build a `CREATE TABLE` statement.
///
/// Fields typed `primaryKey` render as the dialect's auto-increment key type
/// with no attributes. They and fields with `key = true` form the trailing
/// `PRIMARY KEY (...)` clause, once each, in declaration order. Defaults are always
/// single-quoted here, unlike `build_column`.
pub fn create_table<D>(
    dialect: &D,
    table: &str,
    definition: &TableDefinition,
    options: &TableOptions,
) -> Result<String>
where
    D: SchemaDialect + ?Sized,
{
    let type_map = dialect.type_map();
    let style = dialect.literal_style();

    let primary_keys: Vec<&str> = definition
        .iter()
        .filter(|(_, field)| field.is_primary_key())
        .map(|(name, _)| name)
        .collect();

    let mut lines = Vec::with_capacity(definition.len() + 1);

    for (field, settings) in definition.iter() {
        let column = settings.to_definition();
        let column_type = column.column_type.as_deref().filter(|t| !t.is_empty());
        let column_type = column_type.ok_or_else(|| {
            DdlError::missing_field(format!("Column type not specified for '{}'", field))
        })?;

        if column_type == PRIMARY_KEY {
            let mapping = type_map
                .primary_key()
                .ok_or_else(|| DdlError::unsupported(dialect.name(), "primaryKey columns"))?;
            lines.push(format!(" {} {}", field, mapping.name));
            continue;
        }

        let mut attrs = column.options;
        let native = match type_map.resolve(column_type) {
            Some(mapping) => {
                attrs.limit = attrs
                    .limit
                    .filter(|_| mapping.limit.is_some())
                    .or(mapping.limit);
                attrs.precision = attrs
                    .precision
                    .filter(|_| mapping.precision.is_some())
                    .or(mapping.precision);
                attrs.scale = attrs
                    .scale
                    .filter(|_| mapping.scale.is_some())
                    .or(mapping.scale);
                mapping.name.to_uppercase()
            }
            None => column_type.to_uppercase(),
        };

        let mut output = format!("{} {}", field, native);

        if let Some(limit) = attrs.limit.filter(|l| *l != 0) {
            output.push_str(&format!("({})", limit));
        } else {
            match (attrs.precision, attrs.scale) {
                (Some(precision), Some(scale)) => {
                    output.push_str(&format!("({},{})", precision, scale))
                }
                (Some(precision), None) => output.push_str(&format!("({})", precision)),
                _ => {}
            }
        }

        if let Some(default) = attrs.default.as_ref().filter(|v| !v.is_null()) {
            output.push_str(&format!(" DEFAULT {}", style.quote(&default.to_string())));
        }

        match attrs.null {
            Some(true) => output.push_str(" NULL"),
            Some(false) => output.push_str(" NOT NULL"),
            None => {}
        }

        lines.push(format!(" {}", output));
    }

    if !primary_keys.is_empty() {
        lines.push(format!(" PRIMARY KEY ({})", primary_keys.join(",")));
    }

    let append = options
        .options
        .as_deref()
        .filter(|o| !o.is_empty())
        .map(|o| format!(" {}", o))
        .unwrap_or_default();

    Ok(format!(
        "CREATE TABLE {} (\n{}\n){}",
        table,
        lines.join(",\n"),
        append
    ))
}
