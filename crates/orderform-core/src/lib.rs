//! # orderform-core: Form Model for the Mask Order Form
//!
//! This crate owns every rule that decides whether an order may be
//! submitted. The HTTP service, the schema strategy and the CLI all
//! depend on it; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `FieldKind` enum.** The five form fields are one tagged
//!    variant. Rule dispatch is an exhaustive `match`, so adding a field
//!    forces every consumer to handle it at compile time.
//!
//! 2. **Pure rules.** [`rules::validate_field`] maps a field kind and a
//!    candidate value to a validity flag with no side effects.
//!
//! 3. **Immutable snapshots.** [`FormState::with_value`] returns a new
//!    snapshot in which only the edited field is revalidated. Aggregate
//!    validity is derived on read, never stored.
//!
//! 4. **Injected sink.** [`OrderForm::submit`] hands an [`OrderPayload`]
//!    to an [`OrderSink`] exactly once per accepted submission and never
//!    on rejection.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `orderform-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. The email pattern is the
//!   only `expect`, on a constant.

pub mod color;
pub mod email;
pub mod error;
pub mod field;
pub mod form;
pub mod payload;
pub mod rules;
pub mod state;

pub use color::Color;
pub use email::is_valid_email;
pub use error::FormError;
pub use field::{FieldKind, FIELD_COUNT};
pub use form::{OrderForm, OrderSink, SubmitOutcome};
pub use payload::OrderPayload;
pub use rules::{parse_quantity, validate_field, QUANTITY_MAX, QUANTITY_MIN};
pub use state::{FieldState, FieldStatus, FormState};
