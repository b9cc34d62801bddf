//! ddlkit schema - dialect-agnostic DDL generation
//!
//! This crate turns logical table descriptions into SQL for a concrete
//! dialect:
//! - `TypeMap` maps logical column types onto native ones
//! - `build_column` / `create_table` render column and table definitions
//! - `alter` holds the statements every dialect shares
//! - `SchemaDialect` is the capability set each engine implements
//! - `SchemaBuilder` ties a dialect to a datasource and connection

pub mod alter;
mod builder;
mod column;
mod config;
mod dialect;
mod literal;
mod table;
mod type_map;

#[cfg(test)]
mod test_dialect;

pub use alter::{ForeignKeyLookup, ForeignKeyOptions, IndexOptions};
pub use builder::*;
pub use column::*;
pub use config::*;
pub use dialect::*;
pub use literal::*;
pub use table::*;
pub use type_map::*;
