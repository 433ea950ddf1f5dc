//! # Extraction Helpers
//!
//! Map axum body rejections onto [`AppError`] and normalize submitted
//! values into the raw string map every validation strategy consumes.

use std::collections::BTreeMap;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::{Form, Json};
use serde_json::Value;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract an url-encoded form body.
pub fn extract_form<T>(result: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    result
        .map(|Form(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Convert a JSON submission into raw string values.
///
/// Strings pass through, numbers are rendered as typed into a numeric
/// control, and `null` reads as an empty control. Any other JSON type is
/// a malformed submission.
pub fn raw_values(fields: BTreeMap<String, Value>) -> Result<BTreeMap<String, String>, AppError> {
    fields
        .into_iter()
        .map(|(key, value)| {
            let raw = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Null => String::new(),
                other => {
                    return Err(AppError::BadRequest(format!(
                        "field {key:?} must be a string or number, got {other}"
                    )))
                }
            };
            Ok((key, raw))
        })
        .collect()
}
