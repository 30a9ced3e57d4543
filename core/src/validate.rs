//! Field-level validation for create and patch requests.
//!
//! # Design
//! Both entry points classify each candidate field three ways: absent
//! (`None` or JSON `null`), present-and-valid, or present-and-invalid.
//! Presence is decided before truthiness ever comes into play, so
//! `completed: false` and `position: 0` are legitimate supplied values.
//! Every violation on a request is collected; the caller gets either a
//! complete `FieldSet` or the full error list, never a partial write.
//!
//! Accepted textual fields are passed through `sanitize` after
//! validation, and the sanitized value is what lands in the `FieldSet`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::sanitize::sanitize;
use crate::types::{FieldSet, TodoDraft, ValidationError};

const TITLE_MISSING: &str = "missing";
const TITLE_INVALID: &str = "must be a string of 1 to 128 characters";
const DUE_INVALID: &str = "must be a valid ISO 8601 date";
const POSITION_INVALID: &str = "must be an integer greater than or equal to 0";
const COMPLETED_INVALID: &str = "must be a boolean";

/// Validate a create request. `title` is required; `completed` defaults
/// to `false` when absent.
pub fn validate_create(draft: &TodoDraft) -> Result<FieldSet, Vec<ValidationError>> {
    let mut fields = collect(draft, true)?;
    if fields.completed.is_none() {
        fields.completed = Some(false);
    }
    Ok(fields)
}

/// Validate a patch request. Every field is optional; an empty draft is
/// a valid no-op. Absent fields mean "leave unchanged" and are never
/// defaulted.
pub fn validate_patch(draft: &TodoDraft) -> Result<FieldSet, Vec<ValidationError>> {
    collect(draft, false)
}

/// Run the shared per-field rules, collecting all violations.
fn collect(draft: &TodoDraft, require_title: bool) -> Result<FieldSet, Vec<ValidationError>> {
    let mut fields = FieldSet::default();
    let mut errors = Vec::new();

    match present(&draft.title) {
        Some(value) => match valid_title(value) {
            Some(title) => fields.title = Some(title),
            None => errors.push(ValidationError::new("title", TITLE_INVALID)),
        },
        None if require_title => errors.push(ValidationError::new("title", TITLE_MISSING)),
        None => {}
    }

    if let Some(value) = present(&draft.due) {
        match value.as_str().filter(|s| is_iso8601(s)) {
            Some(due) => fields.due = Some(due.to_string()),
            None => errors.push(ValidationError::new("due", DUE_INVALID)),
        }
    }

    if let Some(value) = present(&draft.position) {
        match value.as_i64().filter(|p| *p >= 0) {
            Some(position) => fields.position = Some(position),
            None => errors.push(ValidationError::new("position", POSITION_INVALID)),
        }
    }

    if let Some(value) = present(&draft.completed) {
        match value.as_bool() {
            Some(completed) => fields.completed = Some(completed),
            None => errors.push(ValidationError::new("completed", COMPLETED_INVALID)),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Markup stripping happens on accepted values only, and the
    // stripped value is what gets persisted.
    if let Some(title) = fields.title.take() {
        fields.title = Some(sanitize(&title));
    }
    if let Some(due) = fields.due.take() {
        fields.due = Some(sanitize(&due));
    }
    Ok(fields)
}

/// A field counts as present only when supplied with a non-`null`
/// value; `null` is the absence sentinel.
fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

fn valid_title(value: &Value) -> Option<String> {
    let s = value.as_str()?;
    let len = s.chars().count();
    (1..=128).contains(&len).then(|| s.to_string())
}

/// Accepts dates, naive date-times (with optional seconds and
/// fraction), and RFC 3339 date-times with an offset.
fn is_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
