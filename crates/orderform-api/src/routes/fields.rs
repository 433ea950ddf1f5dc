//! # Field Feedback Routes
//!
//! Routes:
//! - GET  /v1/form: Initial form snapshot plus the bounds the controls need
//! - POST /v1/fields/{field}/validate: Run one field's rule over a value
//!
//! Field validation is stateless: each call judges the given value alone,
//! the same way a single edit does on a mounted form.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use orderform_core::{Color, FieldKind, FieldState, FormState, QUANTITY_MAX, QUANTITY_MIN};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::{AppState, ValidationStrategy};

/// Snapshot of a freshly mounted form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    /// Per-field value and validity, keyed by field name.
    #[schema(value_type = Object)]
    pub state: FormState,
    /// Offered colors, in display order.
    pub colors: Vec<String>,
    pub quantity_min: i64,
    pub quantity_max: i64,
    /// Strategy the server uses to accept submissions.
    pub strategy: ValidationStrategy,
}

/// Body of a field validation request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldValueRequest {
    pub value: String,
}

/// Verdict for one field value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldValidation {
    pub field: String,
    pub value: String,
    pub valid: bool,
    /// One of `empty`, `invalid`, `valid`.
    pub status: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/form", get(form_snapshot))
        .route("/v1/fields/{field}/validate", post(validate_field))
}

/// GET /v1/form: Values and validity of a form as first shown.
#[utoipa::path(
    get,
    path = "/v1/form",
    responses(
        (status = 200, description = "Initial form state", body = FormDescriptor),
    ),
    tag = "form"
)]
async fn form_snapshot(State(state): State<AppState>) -> Json<FormDescriptor> {
    Json(FormDescriptor {
        state: FormState::new(),
        colors: Color::all().iter().map(|c| c.as_str().to_string()).collect(),
        quantity_min: QUANTITY_MIN,
        quantity_max: QUANTITY_MAX,
        strategy: state.config.strategy,
    })
}

/// POST /v1/fields/{field}/validate: Judge a single value.
#[utoipa::path(
    post,
    path = "/v1/fields/{field}/validate",
    params(("field" = String, Path, description = "Field name (firstName, lastName, email, color, quantity)")),
    request_body = FieldValueRequest,
    responses(
        (status = 200, description = "Field verdict", body = FieldValidation),
        (status = 404, description = "No such field", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed body", body = crate::error::ErrorBody),
    ),
    tag = "form"
)]
async fn validate_field(
    Path(field): Path<String>,
    body: Result<Json<FieldValueRequest>, JsonRejection>,
) -> Result<Json<FieldValidation>, AppError> {
    let kind = field
        .parse::<FieldKind>()
        .map_err(|_| AppError::NotFound(format!("field {field:?}")))?;
    let req = extract_json(body)?;

    let slot = FieldState::new(kind, req.value);
    Ok(Json(FieldValidation {
        field: kind.as_str().to_string(),
        status: slot.status().to_string(),
        valid: slot.valid,
        value: slot.value,
    }))
}
