//! # Submission Pipeline
//!
//! Runs a raw submission through the configured [`ValidationStrategy`]
//! and, on acceptance, delivers the order to the sink exactly once.
//!
//! ```text
//! raw values ──▶ PerField: OrderForm edits ──▶ submit ──┐
//!            └─▶ Schema:   coerce + batch validate ─────┴─▶ sink ──▶ receipt
//! ```
//!
//! A rejection never reaches the sink.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use orderform_core::{FieldKind, FormState, OrderForm, OrderPayload, SubmitOutcome};
use orderform_schema::SchemaValidationError;

use crate::error::AppError;
use crate::state::{AppState, ValidationStrategy};

/// Acknowledgement returned for an accepted order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub received_at: DateTime<Utc>,
    /// The payload that was delivered to the sink.
    #[schema(value_type = Object)]
    pub order: OrderPayload,
}

/// Validate `raw` with the configured strategy and deliver it.
///
/// # Errors
///
/// [`AppError::Rejected`] when the order fails validation,
/// [`AppError::Validation`] when it names a field the form does not have
/// (per-field strategy), [`AppError::Internal`] if the schema strategy
/// fails for reasons other than the submission itself.
pub fn submit_order(
    state: &AppState,
    raw: BTreeMap<String, String>,
) -> Result<OrderReceipt, AppError> {
    let strategy = state.config.strategy;
    let order = match strategy {
        ValidationStrategy::PerField => submit_per_field(state, raw),
        ValidationStrategy::Schema => submit_with_schema(state, raw),
    }
    .map_err(|e| {
        if let AppError::Rejected { invalid, .. } = &e {
            tracing::debug!(%strategy, ?invalid, "order rejected");
        }
        e
    })?;

    let receipt = OrderReceipt {
        order_id: Uuid::new_v4(),
        received_at: Utc::now(),
        order,
    };

    tracing::info!(
        order_id = %receipt.order_id,
        %strategy,
        color = %receipt.order.color,
        quantity = receipt.order.quantity,
        "order accepted"
    );

    Ok(receipt)
}

/// Replay the raw values as edits on a freshly mounted form and submit it.
///
/// Fields absent from the submission keep their mount defaults.
fn submit_per_field(
    state: &AppState,
    raw: BTreeMap<String, String>,
) -> Result<OrderPayload, AppError> {
    let edits = parse_edits(raw)?;

    let mut form = OrderForm::new(|order: OrderPayload| state.sink.accept(order));
    for (kind, value) in edits {
        form.edit(kind, value);
    }

    match form.submit() {
        SubmitOutcome::Submitted(order) => Ok(order),
        SubmitOutcome::Rejected { invalid } => Err(AppError::Rejected {
            violations: describe_invalid(form.state(), &invalid),
            invalid,
        }),
    }
}

fn submit_with_schema(
    state: &AppState,
    raw: BTreeMap<String, String>,
) -> Result<OrderPayload, AppError> {
    match state.schema.validate_submission(raw) {
        Ok(order) => {
            state.sink.accept(order.clone());
            Ok(order)
        }
        Err(SchemaValidationError::ValidationFailed { violations, .. }) => {
            let invalid = violations.fields();
            let violations = violations
                .into_inner()
                .into_iter()
                .map(|v| {
                    let at = if v.instance_path.is_empty() {
                        "(root)".to_string()
                    } else {
                        v.instance_path
                    };
                    format!("{at}: {}", v.message)
                })
                .collect();
            Err(AppError::Rejected {
                invalid,
                violations,
            })
        }
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// Map raw keys onto form fields.
pub fn parse_edits(raw: BTreeMap<String, String>) -> Result<Vec<(FieldKind, String)>, AppError> {
    raw.into_iter()
        .map(|(key, value)| -> Result<(FieldKind, String), AppError> {
            Ok((key.parse::<FieldKind>()?, value))
        })
        .collect()
}

/// One display line per invalid field of `state`.
pub fn describe_invalid(state: &FormState, invalid: &[FieldKind]) -> Vec<String> {
    invalid
        .iter()
        .map(|kind| {
            let value = state.value(*kind);
            if value.is_empty() {
                format!("{kind}: required")
            } else {
                format!("{kind}: {value:?} is not acceptable")
            }
        })
        .collect()
}
