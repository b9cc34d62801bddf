//! MySQL/MariaDB dialect

mod dialect;
mod schema;

pub use dialect::{MySqlDialect, mysql_type_map};

#[cfg(test)]
mod tests;
