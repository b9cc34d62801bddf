//! In-memory connection for tests.
//!
//! `ScriptedConnection` answers `execute` by matching the SQL against
//! registered substrings, then serves the matching rows through `fetch` and
//! `fetch_all`. Every executed statement is logged for assertions.

use crate::{Connection, DdlError, Result, Row, Value};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

pub struct ScriptedConnection {
    driver: String,
    tables: Vec<String>,
    responses: Vec<(String, Vec<Row>)>,
    failure: Option<String>,
    pending: Mutex<VecDeque<Row>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedConnection {
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            tables: Vec::new(),
            responses: Vec::new(),
            failure: None,
            pending: Mutex::new(VecDeque::new()),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Register rows for statements containing `sql_contains`.
    /// Earlier registrations win when several patterns match.
    pub fn with_response(mut self, sql_contains: impl Into<String>, rows: Vec<Row>) -> Self {
        self.responses.push((sql_contains.into(), rows));
        self
    }

    /// Make every `execute` fail with a query error
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Statements executed so far, in order
    pub fn executed(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

/// Build a row from `(column, value)` pairs
pub fn row<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Row
where
    K: Into<String>,
    V: Into<Value>,
{
    Row::from_pairs(pairs)
}

#[async_trait]
impl Connection for ScriptedConnection {
    fn driver_name(&self) -> &str {
        &self.driver
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        self.log.lock().push(sql.to_string());
        if let Some(message) = &self.failure {
            return Err(DdlError::Query(message.clone()));
        }
        let rows = self
            .responses
            .iter()
            .find(|(pattern, _)| sql.contains(pattern.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default();
        *self.pending.lock() = rows.into();
        Ok(())
    }

    async fn fetch(&self) -> Result<Option<Row>> {
        Ok(self.pending.lock().pop_front())
    }

    async fn fetch_all(&self) -> Result<Vec<Row>> {
        Ok(self.pending.lock().drain(..).collect())
    }

    async fn tables(&self) -> Result<Vec<String>> {
        if let Some(message) = &self.failure {
            return Err(DdlError::Connection(message.clone()));
        }
        Ok(self.tables.clone())
    }
}
