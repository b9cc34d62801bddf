//! Schema builder configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! datasource = "default"
//! dialect = "postgresql"
//! literal_style = "escaped"
//!
//! [types.string]
//! name = "text"
//! ```

use crate::{DialectSettings, LiteralStyle, TypeMap, TypeMapping};
use ddlkit_core::{DdlError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Datasource name the builder reports
    #[serde(default = "default_datasource")]
    pub datasource: String,
    /// Dialect name or alias, e.g. "mysql", "pg", "sqlite3"
    pub dialect: String,
    /// Literal formatting for default values
    #[serde(default)]
    pub literal_style: LiteralStyle,
    /// Type mappings replacing the dialect's built-in ones
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub types: IndexMap<String, TypeMapping>,
}

fn default_datasource() -> String {
    "default".to_string()
}

impl SchemaConfig {
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            datasource: default_datasource(),
            dialect: dialect.into(),
            literal_style: LiteralStyle::default(),
            types: IndexMap::new(),
        }
    }

    pub fn with_datasource(mut self, datasource: impl Into<String>) -> Self {
        self.datasource = datasource.into();
        self
    }

    pub fn with_literal_style(mut self, literal_style: LiteralStyle) -> Self {
        self.literal_style = literal_style;
        self
    }

    pub fn with_type(mut self, logical: impl Into<String>, mapping: TypeMapping) -> Self {
        self.types.insert(logical.into(), mapping);
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SchemaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading schema config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dialect.trim().is_empty() {
            return Err(DdlError::Configuration(
                "dialect must not be empty".to_string(),
            ));
        }
        if self.datasource.is_empty() {
            return Err(DdlError::Configuration(
                "datasource must not be empty".to_string(),
            ));
        }
        if let Some((logical, _)) = self.types.iter().find(|(_, m)| m.name.is_empty()) {
            return Err(DdlError::Configuration(format!(
                "type mapping '{}' has an empty native name",
                logical
            )));
        }
        Ok(())
    }

    /// Apply this configuration to a dialect's built-in type map
    pub fn settings_for(&self, type_map: TypeMap) -> DialectSettings {
        DialectSettings::new(type_map)
            .with_type_overrides(&self.types)
            .with_literal_style(self.literal_style)
    }
}
