//! Parameterized SQL construction and row mapping for the `todos` table.
//!
//! # Design
//! Each operation is split the same way the validator/store boundary
//! is: a pure `*_statement` builder produces a `Statement` (SQL text
//! plus bound parameters) and `todo_from_row` consumes result rows.
//! The host executes the statement in between, so this module never
//! performs I/O.
//!
//! Every runtime value is bound as a `?n` placeholder. The only text
//! that varies per call is column names chosen from fixed sets (the
//! `SET` clause and the `ORDER BY` direction), never client data, so
//! injection through statement text is structurally impossible.
//!
//! Writes use `RETURNING` so the affected row comes back in the same
//! statement: creates cannot race a "most recent row" lookup, and an
//! update or delete that returns zero rows is a concurrent-removal
//! signal the caller can surface as not-found.

use crate::error::RowError;
use crate::types::{FieldSet, TodoItem};

/// Canonical column order for every statement that returns rows.
/// `todo_from_row` depends on it.
const COLUMNS: &str = "id, title, due, position, completed";

/// A scalar crossing the store boundary, in either direction: bound as
/// a statement parameter on the way in, returned as a row column on
/// the way out.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
    Bool(bool),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// SQL text plus the parameters to bind, ready for `Store::query`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub params: Vec<SqlValue>,
}

/// Ordering direction for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// Select all items, optionally filtered on `completed`, ordered by
/// `position`.
pub fn list_statement(completed: Option<bool>, order: Order) -> Statement {
    let dir = order.keyword();
    match completed {
        Some(flag) => Statement {
            text: format!(
                "SELECT {COLUMNS} FROM todos WHERE completed = ?1 ORDER BY position {dir}"
            ),
            params: vec![flag.into()],
        },
        None => Statement {
            text: format!("SELECT {COLUMNS} FROM todos ORDER BY position {dir}"),
            params: Vec::new(),
        },
    }
}

/// Select the single item with the given id.
pub fn get_statement(id: i64) -> Statement {
    Statement {
        text: format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"),
        params: vec![id.into()],
    }
}

/// Insert a new item and return the created row atomically.
pub fn insert_statement(fields: &FieldSet) -> Statement {
    Statement {
        text: format!(
            "INSERT INTO todos (title, due, position, completed) \
             VALUES (?1, ?2, ?3, ?4) RETURNING {COLUMNS}"
        ),
        params: vec![
            fields.title.clone().into(),
            fields.due.clone().into(),
            fields.position.into(),
            fields.completed.unwrap_or(false).into(),
        ],
    }
}

/// Update only the columns present in `fields`, returning the updated
/// row. `None` when no field is present: a no-op patch issues no write.
pub fn update_statement(id: i64, fields: &FieldSet) -> Option<Statement> {
    let mut set = Vec::new();
    let mut params: Vec<SqlValue> = Vec::new();

    let mut assign = |column: &str, value: SqlValue| {
        params.push(value);
        set.push(format!("{column} = ?{}", params.len()));
    };

    if let Some(title) = &fields.title {
        assign("title", title.clone().into());
    }
    if let Some(due) = &fields.due {
        assign("due", due.clone().into());
    }
    if let Some(position) = fields.position {
        assign("position", position.into());
    }
    if let Some(completed) = fields.completed {
        assign("completed", completed.into());
    }

    if set.is_empty() {
        return None;
    }

    params.push(id.into());
    Some(Statement {
        text: format!(
            "UPDATE todos SET {} WHERE id = ?{} RETURNING {COLUMNS}",
            set.join(", "),
            params.len()
        ),
        params,
    })
}

/// Delete the item with the given id, returning the row as it existed
/// before deletion. Zero returned rows means the id matched nothing.
pub fn delete_statement(id: i64) -> Statement {
    Statement {
        text: format!("DELETE FROM todos WHERE id = ?1 RETURNING {COLUMNS}"),
        params: vec![id.into()],
    }
}

/// Map a result row in canonical column order into a `TodoItem`.
///
/// `completed` tolerates `Int(0|1)` because SQLite has no boolean
/// column affinity.
pub fn todo_from_row(row: &[SqlValue]) -> Result<TodoItem, RowError> {
    let [id, title, due, position, completed] = row else {
        return Err(RowError::ColumnCount {
            expected: 5,
            got: row.len(),
        });
    };

    let id = match id {
        SqlValue::Int(v) => *v,
        _ => return Err(type_error("id", "integer")),
    };
    let title = match title {
        SqlValue::Text(v) => v.clone(),
        _ => return Err(type_error("title", "text")),
    };
    let due = match due {
        SqlValue::Null => None,
        SqlValue::Text(v) => Some(v.clone()),
        _ => return Err(type_error("due", "text or null")),
    };
    let position = match position {
        SqlValue::Null => None,
        SqlValue::Int(v) => Some(*v),
        _ => return Err(type_error("position", "integer or null")),
    };
    let completed = match completed {
        SqlValue::Bool(v) => *v,
        SqlValue::Int(v) => *v != 0,
        _ => return Err(type_error("completed", "boolean")),
    };

    Ok(TodoItem {
        id,
        title,
        due,
        position,
        completed,
    })
}

fn type_error(column: &'static str, expected: &'static str) -> RowError {
    RowError::ColumnType { column, expected }
}
