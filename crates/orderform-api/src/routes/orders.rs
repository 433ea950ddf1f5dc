//! # Order Submission Route
//!
//! - POST /v1/orders: JSON submission; 201 with a receipt, or 422 listing
//!   the invalid fields
//!
//! Field values may be strings or numbers. `null` counts as an empty
//! control.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_json, raw_values};
use crate::state::AppState;
use crate::submit::{submit_order, OrderReceipt};

/// Shape of a JSON order submission.
///
/// Every field is optional on the wire; what happens to an absent field
/// depends on the validation strategy.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// One of `red`, `blue`, `green`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Whole number of masks, as a string or a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub quantity: Option<Value>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/orders", post(create_order))
}

/// POST /v1/orders: Validate and submit an order.
#[utoipa::path(
    post,
    path = "/v1/orders",
    request_body = OrderSubmission,
    responses(
        (status = 201, description = "Order accepted", body = OrderReceipt),
        (status = 422, description = "Order rejected or body malformed", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<BTreeMap<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderReceipt>), AppError> {
    let raw = raw_values(extract_json(body)?)?;
    let receipt = submit_order(&state, raw)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
