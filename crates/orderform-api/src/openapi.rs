//! # OpenAPI Document
//!
//! Collects the utoipa-documented JSON routes into one OpenAPI spec served
//! at `/openapi.json`. The HTML page routes are not part of it.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// OpenAPI spec for the JSON surface of the order form service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Form API",
        version = "0.1.0",
        description = "Field feedback and order submission for the face mask order form."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::fields::form_snapshot,
        crate::routes::fields::validate_field,
        crate::routes::orders::create_order,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::state::ValidationStrategy,
            crate::routes::fields::FormDescriptor,
            crate::routes::fields::FieldValueRequest,
            crate::routes::fields::FieldValidation,
            crate::routes::orders::OrderSubmission,
            crate::submit::OrderReceipt,
        )
    ),
    tags(
        (name = "form", description = "Form snapshot and per-field feedback"),
        (name = "orders", description = "Order submission"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
