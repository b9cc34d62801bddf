//! PostgreSQL dialect

mod dialect;
mod schema;

pub use dialect::{PostgresDialect, postgres_type_map};

#[cfg(test)]
mod tests;
