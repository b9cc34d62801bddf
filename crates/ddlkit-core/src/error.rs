//! Error types for ddlkit

use thiserror::Error;

/// Core error type for ddlkit operations
#[derive(Error, Debug)]
pub enum DdlError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unsupported operation: {operation} is not supported by the {dialect} dialect")]
    UnsupportedOperation {
        dialect: String,
        operation: String,
    },

    #[error("No connection bound to datasource '{0}'")]
    ConnectionNotBound(String),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DdlError {
    /// Shorthand for a missing `name`/`type` style input error
    pub fn missing_field(message: impl Into<String>) -> Self {
        DdlError::MissingField(message.into())
    }

    /// Shorthand for an operation a dialect cannot express
    pub fn unsupported(dialect: impl Into<String>, operation: impl Into<String>) -> Self {
        DdlError::UnsupportedOperation {
            dialect: dialect.into(),
            operation: operation.into(),
        }
    }
}

/// Result type alias for ddlkit operations
pub type Result<T> = std::result::Result<T, DdlError>;
