//! Domain types for the todo service.
//!
//! # Design
//! `TodoDraft` keeps every field as an optional `serde_json::Value` so
//! that wrong-typed input reaches the validator and produces a
//! field-level error instead of a serde rejection. `FieldSet` is the
//! validator's output: `Some` means present-and-valid (sanitized where
//! textual), `None` means absent. The two are deliberately distinct
//! types so unvalidated input can never flow into a statement builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single todo item as persisted in the `todos` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub due: Option<String>,
    pub position: Option<i64>,
    pub completed: bool,
}

/// Raw decoded request body for create and patch.
///
/// Fields are untyped on purpose: `{"completed": "yes"}` must surface
/// as a validation error for `completed`, not as a deserialization
/// failure for the whole body. Absent and `null` fields both
/// deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoDraft {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub due: Option<Value>,
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub completed: Option<Value>,
}

/// Validated, sanitized subset of input fields ready for persistence.
///
/// Produced by `validate_create` / `validate_patch`. On create, `title`
/// is guaranteed present and `completed` is defaulted; on patch, any
/// subset (including none) may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub title: Option<String>,
    pub due: Option<String>,
    pub position: Option<i64>,
    pub completed: Option<bool>,
}

impl FieldSet {
    /// True when no field is present, i.e. a no-op patch.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.due.is_none()
            && self.position.is_none()
            && self.completed.is_none()
    }
}

/// One violated constraint on one request field.
///
/// Serialized as `{"field": ..., "error": ...}`; a request with several
/// violations yields one entry per violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub error: String,
}

impl ValidationError {
    pub fn new(field: &str, error: &str) -> Self {
        Self {
            field: field.to_string(),
            error: error.to_string(),
        }
    }
}
