//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Returns JSON bodies with a machine-readable code, a message and, for
//! rejected submissions, the offending fields. Internal details are
//! logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use orderform_core::{FieldKind, FormError};

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "NOT_FOUND", "ORDER_REJECTED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Present only for rejected submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request content is semantically invalid (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The order did not pass validation and was not submitted (422).
    #[error("order rejected; invalid fields: {}", field_list(.invalid))]
    Rejected {
        /// Fields whose values failed validation.
        invalid: Vec<FieldKind>,
        /// One line per violation, for display.
        violations: Vec<String>,
    },

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

fn field_list(fields: &[FieldKind]) -> String {
    if fields.is_empty() {
        return "(none)".to_string();
    }
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Rejected { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "ORDER_REJECTED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status_and_code().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let details = match &self {
            Self::Rejected {
                invalid,
                violations,
            } => Some(serde_json::json!({
                "invalidFields": invalid,
                "violations": violations,
            })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Incomplete { invalid } => Self::Rejected {
                violations: invalid.iter().map(|f| format!("{f}: invalid value")).collect(),
                invalid,
            },
            other => Self::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_status_code() {
        let err = AppError::Rejected {
            invalid: vec![FieldKind::Email],
            violations: vec!["email: invalid value".to_string()],
        };
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "ORDER_REJECTED");
        assert_eq!(err.to_string(), "order rejected; invalid fields: email");
    }

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("field zip".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_field_maps_to_validation() {
        let err: AppError = FormError::UnknownField("zip".to_string()).into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn incomplete_maps_to_rejected() {
        let err: AppError = FormError::Incomplete {
            invalid: vec![FieldKind::Quantity],
        }
        .into();
        match err {
            AppError::Rejected { invalid, .. } => assert_eq!(invalid, vec![FieldKind::Quantity]),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn internal_message_is_hidden() {
        let response = AppError::Internal("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
