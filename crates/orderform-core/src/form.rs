//! # Order Form and Submission Gate
//!
//! [`OrderForm`] owns the current [`FormState`] snapshot and the injected
//! [`OrderSink`]. Edits replace the snapshot; [`OrderForm::submit`] hands
//! the payload to the sink only when every field is valid.
//!
//! A rejected submission is not an error. It returns
//! [`SubmitOutcome::Rejected`] and the sink never hears about it.

use crate::field::FieldKind;
use crate::payload::OrderPayload;
use crate::state::{FieldState, FormState};

/// Receives validated orders.
///
/// Implemented for any `Fn(OrderPayload)` so tests and callers can pass a
/// closure.
pub trait OrderSink {
    fn accept(&self, order: OrderPayload);
}

impl<F> OrderSink for F
where
    F: Fn(OrderPayload),
{
    fn accept(&self, order: OrderPayload) {
        self(order)
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field was valid; the payload was delivered to the sink.
    Submitted(OrderPayload),
    /// Submission was suppressed because these fields are invalid.
    Rejected { invalid: Vec<FieldKind> },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// A mounted order form bound to its sink.
#[derive(Debug)]
pub struct OrderForm<S> {
    state: FormState,
    sink: S,
}

impl<S: OrderSink> OrderForm<S> {
    /// Mount a form with default field values.
    pub fn new(sink: S) -> Self {
        Self {
            state: FormState::new(),
            sink,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Set `kind` to `value`, revalidating that field only.
    ///
    /// Returns the field's new slot for immediate feedback.
    pub fn edit(&mut self, kind: FieldKind, value: impl Into<String>) -> &FieldState {
        self.state = self.state.with_value(kind, value);
        self.state.field(kind)
    }

    /// Attempt to submit the current snapshot.
    ///
    /// Submitting an unchanged valid form again delivers an identical
    /// payload again; the snapshot is not cleared on success.
    pub fn submit(&self) -> SubmitOutcome {
        match self.state.to_payload() {
            Ok(order) => {
                self.sink.accept(order.clone());
                SubmitOutcome::Submitted(order)
            }
            Err(_) => SubmitOutcome::Rejected {
                invalid: self.state.invalid_fields(),
            },
        }
    }

    /// Discard all edits, as if the form were remounted.
    pub fn reset(&mut self) {
        self.state = FormState::new();
    }

    /// Unmount the form, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
