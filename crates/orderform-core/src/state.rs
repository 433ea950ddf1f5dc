//! # Form State Snapshots
//!
//! [`FormState`] holds one [`FieldState`] per [`FieldKind`]. Every field is
//! present by construction: the struct has one slot per field, and all
//! slot access goes through an exhaustive `match`.
//!
//! ## Per-field state machine
//!
//! ```text
//!            edit (non-empty, rule fails)
//!   Empty ─────────────────────────────▶ Invalid
//!     │  ◀───────── edit ("") ─────────   │  ▲
//!     │                                   │  │
//!     └──── edit (non-empty, rule ok) ──▶ Valid
//! ```
//!
//! Every state is reachable from every other on a single edit. There is no
//! terminal state; [`FormState::new`] is the only reset.
//!
//! ## Snapshot discipline
//!
//! Snapshots are immutable. [`FormState::with_value`] returns a new
//! snapshot in which only the edited field is revalidated; the other four
//! slots are carried over untouched. Aggregate validity is derived on read.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::FormError;
use crate::field::FieldKind;
use crate::payload::OrderPayload;
use crate::rules::{parse_quantity, validate_field};

/// The value of one field and whether it passed that field's rule.
///
/// Only [`FieldState::new`] sets `valid`; there is no way to build a slot
/// from a stored flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub value: String,
    pub valid: bool,
}

impl FieldState {
    /// Build a field slot, running `kind`'s rule over `value`.
    pub fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        let value = value.into();
        let valid = validate_field(kind, Some(&value));
        Self { value, valid }
    }

    /// The state-machine position of this slot.
    pub fn status(&self) -> FieldStatus {
        if self.value.is_empty() {
            FieldStatus::Empty
        } else if self.valid {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        }
    }
}

/// Position of a field in its validation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Empty,
    Invalid,
    Valid,
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Invalid => "invalid",
            Self::Valid => "valid",
        };
        f.write_str(s)
    }
}

/// An immutable snapshot of the whole form.
///
/// Deserializing reads only the field values and runs every rule again;
/// `valid` flags in the input are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SnapshotValues")]
pub struct FormState {
    first_name: FieldState,
    last_name: FieldState,
    email: FieldState,
    color: FieldState,
    quantity: FieldState,
}

impl FormState {
    /// The snapshot a freshly mounted form starts from.
    ///
    /// Every field is empty and invalid except `color`, which is
    /// preselected to [`Color::default`] and valid.
    pub fn new() -> Self {
        Self {
            first_name: FieldState::new(FieldKind::FirstName, ""),
            last_name: FieldState::new(FieldKind::LastName, ""),
            email: FieldState::new(FieldKind::Email, ""),
            color: FieldState::new(FieldKind::Color, Color::default().as_str()),
            quantity: FieldState::new(FieldKind::Quantity, ""),
        }
    }

    /// Apply a sequence of edits to a fresh snapshot.
    ///
    /// Fields that are not edited keep their mount defaults.
    pub fn from_edits<I, S>(edits: I) -> Self
    where
        I: IntoIterator<Item = (FieldKind, S)>,
        S: Into<String>,
    {
        edits
            .into_iter()
            .fold(Self::new(), |state, (kind, value)| state.with_value(kind, value))
    }

    /// Returns the slot for `kind`.
    pub fn field(&self, kind: FieldKind) -> &FieldState {
        match kind {
            FieldKind::FirstName => &self.first_name,
            FieldKind::LastName => &self.last_name,
            FieldKind::Email => &self.email,
            FieldKind::Color => &self.color,
            FieldKind::Quantity => &self.quantity,
        }
    }

    /// Returns the current value of `kind`.
    pub fn value(&self, kind: FieldKind) -> &str {
        &self.field(kind).value
    }

    /// Returns a new snapshot with `kind` set to `value` and revalidated.
    pub fn with_value(&self, kind: FieldKind, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match kind {
            FieldKind::FirstName => &mut next.first_name,
            FieldKind::LastName => &mut next.last_name,
            FieldKind::Email => &mut next.email,
            FieldKind::Color => &mut next.color,
            FieldKind::Quantity => &mut next.quantity,
        };
        *slot = FieldState::new(kind, value);
        next
    }

    /// True when every field's validity flag is set.
    pub fn is_valid(&self) -> bool {
        FieldKind::all().iter().all(|k| self.field(*k).valid)
    }

    /// Fields whose validity flag is currently false, in form order.
    pub fn invalid_fields(&self) -> Vec<FieldKind> {
        FieldKind::all()
            .iter()
            .copied()
            .filter(|k| !self.field(*k).valid)
            .collect()
    }

    /// Build the order payload, coercing quantity to an integer.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Incomplete`] if any field is invalid.
    pub fn to_payload(&self) -> Result<OrderPayload, FormError> {
        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            return Err(FormError::Incomplete { invalid });
        }

        let color: Color = self.color.value.parse()?;
        let quantity = parse_quantity(&self.quantity.value).ok_or(FormError::Incomplete {
            invalid: vec![FieldKind::Quantity],
        })?;

        Ok(OrderPayload {
            first_name: self.first_name.value.clone(),
            last_name: self.last_name.value.clone(),
            email: self.email.value.clone(),
            color,
            quantity,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized snapshot as read back: values only.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotValues {
    first_name: StoredValue,
    last_name: StoredValue,
    email: StoredValue,
    color: StoredValue,
    quantity: StoredValue,
}

#[derive(Deserialize)]
struct StoredValue {
    value: String,
}

impl From<SnapshotValues> for FormState {
    fn from(stored: SnapshotValues) -> Self {
        Self {
            first_name: FieldState::new(FieldKind::FirstName, stored.first_name.value),
            last_name: FieldState::new(FieldKind::LastName, stored.last_name.value),
            email: FieldState::new(FieldKind::Email, stored.email.value),
            color: FieldState::new(FieldKind::Color, stored.color.value),
            quantity: FieldState::new(FieldKind::Quantity, stored.quantity.value),
        }
    }
}
