//! # Per-Field Validation Rules
//!
//! Maps each [`FieldKind`] to a pure rule over its candidate string value.
//! Rules are independent: no rule reads another field.
//!
//! | Field | Rule |
//! |-------|------|
//! | `firstName`, `lastName` | non-empty |
//! | `email` | non-empty, matches [`is_valid_email`] |
//! | `color` | one of the enumerated [`Color`]s |
//! | `quantity` | base-10 integer, not above [`QUANTITY_MAX`] |
//!
//! The per-field strategy enforces no lower quantity bound; the control
//! advertises [`QUANTITY_MIN`] and the schema strategy enforces it.

use crate::color::Color;
use crate::email::is_valid_email;
use crate::field::FieldKind;

/// Smallest quantity advertised by the form control.
pub const QUANTITY_MIN: i64 = 1;

/// Largest quantity a single order may request.
pub const QUANTITY_MAX: i64 = 5;

/// A pure validity rule over a non-empty candidate value.
pub type FieldRule = fn(&str) -> bool;

/// Decide whether `value` is acceptable for `kind`.
///
/// An absent or empty value is invalid for every field.
pub fn validate_field(kind: FieldKind, value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.is_empty() => rule_for(kind)(v),
        _ => false,
    }
}

/// The rule applied to non-empty values of `kind`.
pub fn rule_for(kind: FieldKind) -> FieldRule {
    match kind {
        FieldKind::FirstName | FieldKind::LastName => any_text,
        FieldKind::Email => is_valid_email,
        FieldKind::Color => is_offered_color,
        FieldKind::Quantity => is_orderable_quantity,
    }
}

/// Parse a quantity as typed into the numeric control.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is
/// not a base-10 integer; a numeric prefix such as `"5abc"` or `"5.5"` is
/// not read as 5.
pub fn parse_quantity(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn any_text(_value: &str) -> bool {
    true
}

fn is_offered_color(value: &str) -> bool {
    value.parse::<Color>().is_ok()
}

fn is_orderable_quantity(value: &str) -> bool {
    matches!(parse_quantity(value), Some(q) if q <= QUANTITY_MAX)
}
