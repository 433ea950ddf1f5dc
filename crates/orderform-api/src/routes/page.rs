//! # Form Page Routes
//!
//! - `GET /`: order form page
//! - `POST /orders`: url-encoded submission from the page; re-renders the
//!   form with invalid controls flagged (or a notice for keys the form
//!   does not have), or shows the receipt

use std::collections::BTreeMap;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};

use orderform_core::{FieldKind, FormState};

use crate::error::AppError;
use crate::extractors::extract_form;
use crate::page::{render_form, render_receipt};
use crate::state::AppState;
use crate::submit::submit_order;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form_page))
        .route("/orders", post(submit_form))
}

async fn form_page() -> Html<String> {
    Html(render_form(&FormState::new(), &[], None))
}

async fn submit_form(
    State(state): State<AppState>,
    body: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> Response {
    let raw = match extract_form(body) {
        Ok(raw) => raw,
        Err(e) => return e.into_response(),
    };

    // Re-display what the customer typed if the order bounces.
    let entered = FormState::from_edits(
        raw.iter()
            .filter_map(|(k, v)| k.parse::<FieldKind>().ok().map(|kind| (kind, v.clone()))),
    );

    match submit_order(&state, raw) {
        Ok(receipt) => (StatusCode::CREATED, Html(render_receipt(&receipt))).into_response(),
        Err(AppError::Rejected { invalid, .. }) => {
            let notice = format!(
                "Please check: {}",
                invalid
                    .iter()
                    .map(|f| f.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            redisplay(&entered, &invalid, &notice)
        }
        Err(AppError::Validation(message)) => redisplay(&entered, &[], &message),
        Err(e) => e.into_response(),
    }
}

fn redisplay(entered: &FormState, flagged: &[FieldKind], notice: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render_form(entered, flagged, Some(notice))),
    )
        .into_response()
}
