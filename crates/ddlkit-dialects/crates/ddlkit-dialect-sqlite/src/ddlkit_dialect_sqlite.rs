//! SQLite dialect

mod dialect;
mod schema;

pub use dialect::{SqliteDialect, sqlite_type_map};

#[cfg(test)]
mod tests;
