//! Error taxonomy for the HTTP surface.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a well-formed id that
//! references nothing is a resource-absence condition, not a client
//! input error. Validation failures carry the full collected error
//! list and never reach the store. Store and row-mapping failures are
//! logged with detail and answered with a generic 500 body; internal
//! error text is never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use todo_core::{RowError, ValidationError};

use crate::store::StoreError;

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more field violations, reported together (HTTP 400).
    #[error("validation failed")]
    Validation(Vec<ValidationError>),

    /// Malformed request outside the body fields, e.g. a bad `completed`
    /// query filter (HTTP 400).
    #[error("{0}")]
    BadRequest(&'static str),

    /// The referenced id has no record (HTTP 404).
    #[error("item not found")]
    NotFound,

    /// Persistence-layer failure (HTTP 500).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The store returned a row this service cannot decode (HTTP 500).
    #[error(transparent)]
    Row(#[from] RowError),

    /// Invariant breach in the store interaction, e.g. an insert whose
    /// `RETURNING` clause produced no row (HTTP 500).
    #[error("{0}")]
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Item not found" })),
            )
                .into_response(),
            AppError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                internal()
            }
            AppError::Row(err) => {
                tracing::error!(error = %err, "row decode failure");
                internal()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = msg, "store invariant breach");
                internal()
            }
        }
    }
}

fn internal() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400_with_error_list() {
        let resp = AppError::Validation(vec![ValidationError::new("title", "missing")])
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let resp = AppError::Store(StoreError::UnsupportedColumn).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
