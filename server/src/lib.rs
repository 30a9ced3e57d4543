//! HTTP surface for the todo service.
//!
//! # Overview
//! Routes CRUD requests to handlers that run the pure validation and
//! statement-building core, then execute the resulting statements
//! against a `Store`. Each request is an independent async task; the
//! store handle is the only shared resource, and SQLite's per-statement
//! isolation is the only locking.
//!
//! # Design
//! - Handlers never build SQL or inspect raw input themselves; they
//!   call `todo_core` and translate its outcomes into status codes.
//! - `id` is a typed `i64` path parameter, so a non-integer id is a
//!   400 from the extractor, distinct from a well-formed id with no
//!   record (404).
//! - Create responds with the single created object, consistent with
//!   get-by-id.

pub mod error;
pub mod store;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use todo_core::{
    delete_statement, get_statement, insert_statement, list_statement, todo_from_row,
    update_statement, validate_create, validate_patch, Order, Statement, TodoDraft, TodoItem,
};

use crate::error::AppError;
use crate::store::Store;

pub use crate::store::{SqliteStore, StoreError};

pub type Db = Arc<dyn Store>;

pub fn app(store: Db) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(patch_todo).delete(delete_todo),
        )
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    completed: Option<String>,
    order: Option<String>,
}

/// Execute a statement and map every returned row into a `TodoItem`.
async fn fetch(db: &Db, stmt: Statement) -> Result<Vec<TodoItem>, AppError> {
    let rows = db.query(&stmt.text, &stmt.params).await?;
    let items = rows
        .iter()
        .map(|row| todo_from_row(row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

async fn list_todos(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TodoItem>>, AppError> {
    let filter = match params.completed.as_deref() {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => return Err(AppError::BadRequest("invalid query string")),
    };
    let order = match params.order.as_deref() {
        Some("desc") => Order::Desc,
        _ => Order::Asc,
    };
    let items = fetch(&db, list_statement(filter, order)).await?;
    Ok(Json(items))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<TodoItem>, AppError> {
    let items = fetch(&db, get_statement(id)).await?;
    items.into_iter().next().map(Json).ok_or(AppError::NotFound)
}

async fn create_todo(
    State(db): State<Db>,
    Json(draft): Json<TodoDraft>,
) -> Result<(StatusCode, Json<TodoItem>), AppError> {
    let fields = validate_create(&draft).map_err(AppError::Validation)?;
    let items = fetch(&db, insert_statement(&fields)).await?;
    let created = items
        .into_iter()
        .next()
        .ok_or(AppError::Internal("insert returned no row"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn patch_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(draft): Json<TodoDraft>,
) -> Result<Json<TodoItem>, AppError> {
    // Validation failures never touch the store.
    let fields = validate_patch(&draft).map_err(AppError::Validation)?;

    let existing = fetch(&db, get_statement(id)).await?;
    let existing = existing.into_iter().next().ok_or(AppError::NotFound)?;

    match update_statement(id, &fields) {
        // No fields supplied: a no-op that returns the unchanged record
        // and issues no write.
        None => Ok(Json(existing)),
        Some(stmt) => {
            let items = fetch(&db, stmt).await?;
            // Zero rows here means the record vanished between lookup
            // and update; surface it as not-found.
            items.into_iter().next().map(Json).ok_or(AppError::NotFound)
        }
    }
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    let items = fetch(&db, delete_statement(id)).await?;
    if items.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_deserialize_from_query() {
        let params: ListParams =
            serde_json::from_str(r#"{"completed":"true","order":"desc"}"#).unwrap();
        assert_eq!(params.completed.as_deref(), Some("true"));
        assert_eq!(params.order.as_deref(), Some("desc"));
    }

    #[test]
    fn list_params_default_to_none() {
        let params = ListParams::default();
        assert!(params.completed.is_none());
        assert!(params.order.is_none());
    }
}
