//! # Error Types
//!
//! Errors raised by the form model. Invalid field values are NOT errors:
//! they are validity flags on [`crate::FieldState`]. The variants here
//! cover inputs that cannot be mapped onto the form at all.

use thiserror::Error;

use crate::field::FieldKind;

/// Top-level error type for the form model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A field name that is not one of the five known fields.
    #[error("unknown form field: {0:?}")]
    UnknownField(String),

    /// A color name that is not one of the enumerated options.
    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    /// A payload was requested while some fields are still invalid.
    #[error("form is incomplete; invalid fields: {}", join_fields(.invalid))]
    Incomplete {
        /// The fields whose validity flag is currently false.
        invalid: Vec<FieldKind>,
    },
}

fn join_fields(fields: &[FieldKind]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_lists_field_names() {
        let err = FormError::Incomplete {
            invalid: vec![FieldKind::Email, FieldKind::Quantity],
        };
        assert_eq!(
            err.to_string(),
            "form is incomplete; invalid fields: email, quantity"
        );
    }

    #[test]
    fn unknown_field_quotes_name() {
        let err = FormError::UnknownField("zip".to_string());
        assert!(err.to_string().contains("\"zip\""));
    }
}
