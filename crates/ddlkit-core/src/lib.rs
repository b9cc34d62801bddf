//! ddlkit core - shared types for the DDL generator
//!
//! This crate provides the pieces every other ddlkit crate depends on:
//!
//! - `DdlError` / `Result` - the error type for generation and introspection
//! - `Value` / `Row` - literal values and result rows
//! - `Connection` - the external collaborator that executes SQL
//! - `ColumnSchema`, `IndexInfo`, `ForeignKeyInfo` - introspection records

mod connection;
mod error;
mod schema;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
mod types;

pub use connection::*;
pub use error::*;
pub use schema::*;
pub use types::*;
