//! SQL literal formatting for default values
//!
//! All literal construction goes through `LiteralStyle`. The default,
//! `Unescaped`, reproduces the historical output byte for byte and does NOT
//! escape embedded quotes: a default such as `it's` yields a broken (or
//! injectable) statement. Select `Escaped` to double embedded quotes instead.

use ddlkit_core::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralStyle {
    /// Text is placed between single quotes verbatim
    #[default]
    Unescaped,
    /// Embedded single quotes are doubled
    Escaped,
}

impl LiteralStyle {
    /// Render a column default: `NULL` bare, integers bare, everything else
    /// single-quoted.
    pub fn column_value(self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(v) => v.to_string(),
            other => self.quote(&other.to_string()),
        }
    }

    /// Wrap text in single quotes
    pub fn quote(self, text: &str) -> String {
        match self {
            LiteralStyle::Unescaped => format!("'{}'", text),
            LiteralStyle::Escaped => format!("'{}'", text.replace('\'', "''")),
        }
    }
}
