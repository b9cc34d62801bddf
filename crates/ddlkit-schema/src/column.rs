//! Column definitions and the column fragment builder

use crate::{LiteralStyle, SchemaDialect, TypeMap};
use ddlkit_core::{DdlError, Result, Value};
use serde::{Deserialize, Serialize};

/// Optional column attributes, as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnOptions {
    /// Length for strings, display width for integers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Digits before the decimal point (decimal, float)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Digits after the decimal point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// Default value. An empty string means "no default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// `Some(true)` allows NULL, `Some(false)` forbids it, `None` says nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null: Option<bool>,
    /// Marks the column as a primary key member when creating a table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn null(mut self, null: bool) -> Self {
        self.null = Some(null);
        self
    }

    pub fn not_null(self) -> Self {
        self.null(false)
    }

    pub fn key(mut self) -> Self {
        self.key = Some(true);
        self
    }
}

/// A single column: name, logical (or native) type and options.
///
/// `name` and `type` are optional here so caller data can be deserialized
/// as-is; rendering fails with `MissingField` when either is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(flatten)]
    pub options: ColumnOptions,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            column_type: Some(column_type.into()),
            options: ColumnOptions::default(),
        }
    }

    /// A nameless definition, as used for table fields keyed by name
    pub fn of_type(column_type: impl Into<String>) -> Self {
        Self {
            name: None,
            column_type: Some(column_type.into()),
            options: ColumnOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ColumnOptions) -> Self {
        self.options = options;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.options.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.options.scale = Some(scale);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.options.default = Some(value.into());
        self
    }

    pub fn null(mut self, null: bool) -> Self {
        self.options.null = Some(null);
        self
    }

    pub fn not_null(self) -> Self {
        self.null(false)
    }

    pub fn key(mut self) -> Self {
        self.options.key = Some(true);
        self
    }

    /// The logical type, if present and non-empty
    pub fn type_name(&self) -> Option<&str> {
        self.column_type.as_deref().filter(|t| !t.is_empty())
    }
}

/// A column after type resolution: native type name plus the attributes
/// that survive the dialect's mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub name: String,
    pub native_type: String,
    pub limit: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub default: Option<Value>,
    pub null: Option<bool>,
}

impl ResolvedColumn {
    /// Reconcile caller options with the type map.
    ///
    /// For a mapped type the native name is upper-cased, caller attributes the
    /// mapping does not declare are dropped, and declared attributes the
    /// caller left unset are filled from the mapping. Unmapped types pass
    /// through untouched.
    pub fn resolve(type_map: &TypeMap, column: &ColumnDefinition) -> Result<Self> {
        let name = column
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DdlError::missing_field("Column name not specified"))?;
        let column_type = column
            .type_name()
            .ok_or_else(|| DdlError::missing_field("Column type not specified"))?;

        let options = &column.options;
        let mut resolved = ResolvedColumn {
            name: name.to_string(),
            native_type: column_type.to_string(),
            limit: options.limit,
            precision: options.precision,
            scale: options.scale,
            default: options
                .default
                .clone()
                .filter(|v| !v.is_null() && !v.is_empty_string()),
            null: options.null,
        };

        if let Some(mapping) = type_map.resolve(column_type) {
            resolved.native_type = mapping.name.to_uppercase();

            if mapping.limit.is_none() {
                resolved.limit = None;
            }
            if mapping.precision.is_none() {
                resolved.precision = None;
            }
            if mapping.scale.is_none() {
                resolved.scale = None;
            }

            if is_unset(resolved.limit) && !is_unset(mapping.limit) {
                resolved.limit = mapping.limit;
            }
            if resolved.precision.is_none() {
                resolved.precision = mapping.precision;
            }
            if resolved.scale.is_none() {
                resolved.scale = mapping.scale;
            }
        }

        Ok(resolved)
    }

    /// `TYPE`, `TYPE(limit)` or `TYPE(precision,scale)`.
    /// An unset scale renders empty, e.g. `FLOAT(8,)`.
    pub fn type_clause(&self) -> String {
        if let Some(limit) = self.limit.filter(|l| *l != 0) {
            format!("{}({})", self.native_type, limit)
        } else if let Some(precision) = self.precision.filter(|p| *p != 0) {
            let scale = self.scale.map(|s| s.to_string()).unwrap_or_default();
            format!("{}({},{})", self.native_type, precision, scale)
        } else {
            self.native_type.clone()
        }
    }

    /// The default/null clause, with a leading space when non-empty.
    ///
    /// Exactly one of `DEFAULT v NOT NULL`, `DEFAULT v`, `DEFAULT NULL` or
    /// `NOT NULL` applies, in that priority order.
    pub fn default_clause(&self, style: LiteralStyle) -> String {
        match (&self.default, self.null) {
            (Some(value), Some(false)) => {
                format!(" DEFAULT {} NOT NULL", style.column_value(value))
            }
            (Some(value), _) => format!(" DEFAULT {}", style.column_value(value)),
            (None, Some(true)) => " DEFAULT NULL".to_string(),
            (None, Some(false)) => " NOT NULL".to_string(),
            (None, None) => String::new(),
        }
    }
}

fn is_unset(value: Option<u32>) -> bool {
    value.is_none_or(|v| v == 0)
}

/// Build the SQL fragment for one column definition, e.g.
/// `age INTEGER DEFAULT 0 NOT NULL`.
pub fn build_column<D>(dialect: &D, column: &ColumnDefinition) -> Result<String>
where
    D: SchemaDialect + ?Sized,
{
    let resolved = ResolvedColumn::resolve(dialect.type_map(), column)?;
    Ok(format!(
        "{} {}{}",
        dialect.quote_column_name(&resolved.name),
        resolved.type_clause(),
        resolved.default_clause(dialect.literal_style())
    ))
}

#[cfg(test)]
mod tests;
