//! Dialect registry

use ddlkit_core::{DdlError, Result};
use ddlkit_schema::{SchemaBuilder, SchemaConfig, SchemaDialect};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a dialect with the type overrides and literal style of a config
pub type DialectFactory = fn(&SchemaConfig) -> Arc<dyn SchemaDialect>;

/// Registry of available dialects, keyed by canonical name
pub struct DialectRegistry {
    dialects: HashMap<String, DialectFactory>,
}

impl DialectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            dialects: HashMap::new(),
        }
    }

    /// Create a registry with all built-in dialects registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "sqlite")]
        registry.register("sqlite", sqlite_dialect);
        #[cfg(feature = "postgres")]
        registry.register("postgresql", postgres_dialect);
        #[cfg(feature = "mysql")]
        registry.register("mysql", mysql_dialect);

        registry
    }

    /// Register a dialect factory under `name`
    pub fn register(&mut self, name: &str, factory: DialectFactory) {
        let name = canonical_dialect_name(name);
        tracing::info!(dialect = %name, "registering dialect");
        self.dialects.insert(name, factory);
    }

    /// Build the dialect named by `config.dialect` (aliases accepted)
    pub fn get(&self, config: &SchemaConfig) -> Option<Arc<dyn SchemaDialect>> {
        let name = canonical_dialect_name(&config.dialect);
        let factory = self.dialects.get(&name);
        if factory.is_none() {
            tracing::warn!(dialect = %name, "dialect not found in registry");
        }
        factory.map(|factory| factory(config))
    }

    /// List all registered dialect names
    pub fn list(&self) -> Vec<&str> {
        self.dialects.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a dialect is registered, by name or alias
    pub fn has(&self, name: &str) -> bool {
        self.dialects.contains_key(&canonical_dialect_name(name))
    }

    /// Build a `SchemaBuilder` for `config`, bound to its datasource name.
    /// The connection is bound separately.
    pub fn open(&self, config: &SchemaConfig) -> Result<SchemaBuilder> {
        config.validate()?;
        let dialect = self
            .get(config)
            .ok_or_else(|| DdlError::UnknownDialect(config.dialect.clone()))?;
        Ok(SchemaBuilder::new(dialect).with_datasource(config.datasource.clone()))
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Fold dialect aliases onto the registered names
pub fn canonical_dialect_name(name: &str) -> String {
    let name = name.trim().to_lowercase();
    match name.as_str() {
        "postgres" | "postgresql" | "pg" => "postgresql".to_string(),
        "mysql" | "mariadb" => "mysql".to_string(),
        "sqlite" | "sqlite3" => "sqlite".to_string(),
        _ => name,
    }
}

/// Build the configured dialect from the built-in set
pub fn create_dialect(config: &SchemaConfig) -> Result<Arc<dyn SchemaDialect>> {
    DialectRegistry::with_defaults()
        .get(config)
        .ok_or_else(|| DdlError::UnknownDialect(config.dialect.clone()))
}

/// Open a `SchemaBuilder` for `config` using the built-in dialects
pub fn open_schema(config: &SchemaConfig) -> Result<SchemaBuilder> {
    DialectRegistry::with_defaults().open(config)
}

#[cfg(feature = "sqlite")]
fn sqlite_dialect(config: &SchemaConfig) -> Arc<dyn SchemaDialect> {
    use crate::sqlite::{SqliteDialect, sqlite_type_map};
    Arc::new(SqliteDialect::with_settings(
        config.settings_for(sqlite_type_map()),
    ))
}

#[cfg(feature = "postgres")]
fn postgres_dialect(config: &SchemaConfig) -> Arc<dyn SchemaDialect> {
    use crate::postgres::{PostgresDialect, postgres_type_map};
    Arc::new(PostgresDialect::with_settings(
        config.settings_for(postgres_type_map()),
    ))
}

#[cfg(feature = "mysql")]
fn mysql_dialect(config: &SchemaConfig) -> Arc<dyn SchemaDialect> {
    use crate::mysql::{MySqlDialect, mysql_type_map};
    Arc::new(MySqlDialect::with_settings(config.settings_for(mysql_type_map())))
}
