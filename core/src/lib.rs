//! Validation and persistence-mapping core for the todo service.
//!
//! # Overview
//! Turns untrusted HTTP input into validated, sanitized field sets and
//! builds the parameterized SQL statements that read and write them,
//! without touching the database (host-does-IO pattern). The caller
//! executes each `Statement` against the store, making the core fully
//! deterministic and testable.
//!
//! # Design
//! - Validation is a pure classification step: each candidate field is
//!   absent, present-and-valid, or present-and-invalid. All violations
//!   on a request are collected before reporting; there is no
//!   short-circuit.
//! - JSON `null` is the absence sentinel. `completed: false` and
//!   `position: 0` are present values, never absences.
//! - Statement builders bind every runtime value as a `?n` parameter;
//!   client data never appears in SQL text.
//! - Result rows come back as plain `SqlValue` scalars and are mapped
//!   into `TodoItem` by `todo_from_row`; integration tests in the
//!   server crate catch schema drift.

pub mod error;
pub mod sanitize;
pub mod statement;
pub mod types;
pub mod validate;

pub use error::RowError;
pub use sanitize::sanitize;
pub use statement::{
    delete_statement, get_statement, insert_statement, list_statement, todo_from_row,
    update_statement, Order, SqlValue, Statement,
};
pub use types::{FieldSet, TodoDraft, TodoItem, ValidationError};
pub use validate::{validate_create, validate_patch};
