//! The async query primitive and its SQLite binding.
//!
//! # Design
//! `Store` is the whole persistence contract the handlers see: one
//! `query` method taking statement text and bound parameters and
//! returning plain `SqlValue` rows. Everything SQL-shaped lives in
//! `todo_core::statement`; this module only executes.
//!
//! `SqliteStore` holds a single `rusqlite::Connection` behind a tokio
//! mutex. One statement runs at a time; isolation between statements
//! is SQLite's own. Schema bootstrap happens on open so the binary
//! runs against a fresh file with no out-of-band setup.

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use thiserror::Error;
use tokio::sync::Mutex;

use todo_core::SqlValue;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    due TEXT,
    position INTEGER,
    completed INTEGER NOT NULL DEFAULT 0
);";

/// Connection or statement failure from the persistence layer. Not
/// locally recoverable; the handler layer logs it and answers 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("unsupported column type in result row")]
    UnsupportedColumn,
}

/// Async query-execution primitive: `query(text, params) -> rows`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn query(
        &self,
        text: &str,
        params: &[SqlValue],
    ) -> Result<Vec<Vec<SqlValue>>, StoreError>;
}

/// SQLite-backed `Store`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and ensure the
    /// `todos` table exists.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn query(
        &self,
        text: &str,
        params: &[SqlValue],
    ) -> Result<Vec<Vec<SqlValue>>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(text)?;
        let columns = stmt.column_count();
        let bound = rusqlite::params_from_iter(params.iter().map(to_sqlite));
        let mut rows = stmt.query(bound)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(columns);
            for i in 0..columns {
                record.push(from_sqlite(row.get_ref(i)?)?);
            }
            out.push(record);
        }
        Ok(out)
    }
}

fn to_sqlite(value: &SqlValue) -> rusqlite::types::Value {
    use rusqlite::types::Value;
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Int(v) => Value::Integer(*v),
        SqlValue::Text(v) => Value::Text(v.clone()),
        // SQLite has no boolean affinity; store as 0/1.
        SqlValue::Bool(v) => Value::Integer(i64::from(*v)),
    }
}

fn from_sqlite(value: ValueRef<'_>) -> Result<SqlValue, StoreError> {
    match value {
        ValueRef::Null => Ok(SqlValue::Null),
        ValueRef::Integer(v) => Ok(SqlValue::Int(v)),
        ValueRef::Text(v) => Ok(SqlValue::Text(
            String::from_utf8_lossy(v).into_owned(),
        )),
        ValueRef::Real(_) | ValueRef::Blob(_) => Err(StoreError::UnsupportedColumn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{
        delete_statement, get_statement, insert_statement, todo_from_row, FieldSet,
    };

    fn fields(title: &str) -> FieldSet {
        FieldSet {
            title: Some(title.to_string()),
            completed: Some(false),
            ..FieldSet::default()
        }
    }

    async fn run(store: &SqliteStore, stmt: todo_core::Statement) -> Vec<Vec<SqlValue>> {
        store.query(&stmt.text, &stmt.params).await.unwrap()
    }

    #[tokio::test]
    async fn insert_returning_yields_created_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rows = run(&store, insert_statement(&fields("Buy milk"))).await;
        assert_eq!(rows.len(), 1);
        let item = todo_from_row(&rows[0]).unwrap();
        assert_eq!(item.title, "Buy milk");
        assert!(!item.completed);
        assert!(item.id > 0);
    }

    #[tokio::test]
    async fn bound_params_keep_quotes_literal() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rows = run(&store, insert_statement(&fields("Rob's list; DROP TABLE todos"))).await;
        let item = todo_from_row(&rows[0]).unwrap();
        assert_eq!(item.title, "Rob's list; DROP TABLE todos");

        // table survived
        let rows = run(&store, get_statement(item.id)).await;
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_id_returns_no_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rows = run(&store, get_statement(999)).await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn delete_returning_yields_prior_row_once() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rows = run(&store, insert_statement(&fields("gone soon"))).await;
        let id = todo_from_row(&rows[0]).unwrap().id;

        let rows = run(&store, delete_statement(id)).await;
        assert_eq!(rows.len(), 1);
        let rows = run(&store, delete_statement(id)).await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn malformed_sql_is_a_store_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.query("SELECT * FROM missing_table", &[]).await;
        assert!(matches!(err, Err(StoreError::Sqlite(_))));
    }
}
