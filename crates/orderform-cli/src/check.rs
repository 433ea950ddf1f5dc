//! # Check Subcommand
//!
//! Validates an order document from disk without starting the service.
//!
//! ## Usage
//!
//! ```bash
//! orderform check order.json
//! orderform check order.yaml --strategy schema
//! ```
//!
//! The document is a map of field name to value; quantity may be a number.
//! An accepted order is printed as pretty JSON. A rejected one prints the
//! invalid fields and exits with status 1.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use serde_json::Value;

use orderform_api::extractors::raw_values;
use orderform_api::submit::{describe_invalid, parse_edits};
use orderform_api::ValidationStrategy;
use orderform_core::{FieldKind, FormError, FormState, OrderPayload};
use orderform_schema::{load_document, SchemaValidationError, SchemaValidator};

use crate::StrategyArg;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Order document (.json, .yaml or .yml).
    pub file: PathBuf,

    /// Validation strategy.
    #[arg(long, value_enum, default_value = "per-field")]
    pub strategy: StrategyArg,
}

/// Result of checking one document.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Accepted(OrderPayload),
    Rejected {
        invalid: Vec<FieldKind>,
        violations: Vec<String>,
    },
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let document = load_document(&args.file)?;
    let outcome = check_document(document, args.strategy.into())
        .with_context(|| format!("cannot check {}", args.file.display()))?;

    match outcome {
        CheckOutcome::Accepted(order) => {
            println!("{}", serde_json::to_string_pretty(&order)?);
            Ok(0)
        }
        CheckOutcome::Rejected {
            invalid,
            violations,
        } => {
            let names: Vec<&str> = invalid.iter().map(|f| f.as_str()).collect();
            println!("rejected: invalid fields: {}", names.join(", "));
            for v in &violations {
                println!("  - {v}");
            }
            Ok(1)
        }
    }
}

/// Run `document` through `strategy`.
///
/// # Errors
///
/// Fails when the document is not a map of scalar values, names a field
/// the form does not have (per-field strategy), or the schema cannot be
/// compiled. A well-formed order that fails validation is not an error.
pub fn check_document(document: Value, strategy: ValidationStrategy) -> Result<CheckOutcome> {
    match strategy {
        ValidationStrategy::PerField => check_per_field(document),
        ValidationStrategy::Schema => check_with_schema(document),
    }
}

fn check_per_field(document: Value) -> Result<CheckOutcome> {
    let fields: BTreeMap<String, Value> = serde_json::from_value(document)
        .map_err(|e| anyhow!("order document must be a map of field to value: {e}"))?;
    let edits = parse_edits(raw_values(fields)?)?;
    let state = FormState::from_edits(edits);

    match state.to_payload() {
        Ok(order) => Ok(CheckOutcome::Accepted(order)),
        Err(FormError::Incomplete { invalid }) => Ok(CheckOutcome::Rejected {
            violations: describe_invalid(&state, &invalid),
            invalid,
        }),
        Err(e) => Err(e.into()),
    }
}

fn check_with_schema(document: Value) -> Result<CheckOutcome> {
    let validator = SchemaValidator::new()?;
    match validator.validate_value(document) {
        Ok(order) => Ok(CheckOutcome::Accepted(order)),
        Err(SchemaValidationError::ValidationFailed { violations, .. }) => {
            let invalid = violations.fields();
            let violations = violations
                .violations()
                .iter()
                .map(|v| format!("{}: {}", v.instance_path, v.message))
                .collect();
            Ok(CheckOutcome::Rejected {
                invalid,
                violations,
            })
        }
        Err(e) => Err(e.into()),
    }
}
