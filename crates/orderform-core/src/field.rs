//! # Form Fields: Single Source of Truth
//!
//! Defines the `FieldKind` enum with the five order form fields. Every
//! `match` on `FieldKind` is exhaustive, so a new field cannot be added
//! without every rule, snapshot and payload mapping handling it.
//!
//! Wire names are camelCase (`firstName`, `lastName`, `email`, `color`,
//! `quantity`) and match the HTML control names and the JSON payload keys.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FormError;

/// The fields of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Customer first name.
    FirstName,
    /// Customer last name.
    LastName,
    /// Contact email address.
    Email,
    /// Mask color.
    Color,
    /// Number of masks, as typed into a numeric input.
    Quantity,
}

/// Total number of form fields.
pub const FIELD_COUNT: usize = 5;

impl FieldKind {
    /// Returns all fields in form order.
    pub fn all() -> &'static [FieldKind] {
        &[
            Self::FirstName,
            Self::LastName,
            Self::Email,
            Self::Color,
            Self::Quantity,
        ]
    }

    /// Returns the camelCase wire name for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Color => "color",
            Self::Quantity => "quantity",
        }
    }

    /// Human-readable label shown next to the control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Color => "Color",
            Self::Quantity => "Quantity",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FormError;

    /// Parse a field from its camelCase wire name. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => Ok(Self::FirstName),
            "lastName" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "color" => Ok(Self::Color),
            "quantity" => Ok(Self::Quantity),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}
