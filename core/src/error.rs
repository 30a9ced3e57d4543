//! Row-mapping errors.
//!
//! A malformed result row means the store and the statement builders
//! disagree about the schema. That is an internal fault, not client
//! input, so it gets its own type and the server maps it to a 500.

use thiserror::Error;

/// Errors from mapping a result row into a `TodoItem`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected {expected} columns, got {got}")]
    ColumnCount { expected: usize, got: usize },

    #[error("column `{column}`: expected {expected}")]
    ColumnType {
        column: &'static str,
        expected: &'static str,
    },
}
