//! # orderform-schema: Schema Strategy for the Order Form
//!
//! The declarative alternative to the per-field rules in `orderform-core`.
//! Instead of revalidating on every edit, the whole submission is checked
//! once at submit time against an embedded JSON Schema.
//!
//! ## Coercion (`coerce`)
//!
//! Raw form values arrive as strings. [`coerce::coerce_submission`] drops
//! empty values (so `required` reports them) and turns a numeric
//! `quantity` string into a JSON number before validation.
//!
//! ## Validation (`validate`)
//!
//! [`SchemaValidator`] compiles `schemas/order.schema.json` once, with
//! format assertions enabled, and reports every violation with its
//! instance path, schema path and the form field it concerns.
//!
//! ## Crate Policy
//!
//! - Depends only on `orderform-core` internally.
//! - A document that passes the schema must always decode into an
//!   [`orderform_core::OrderPayload`].

pub mod coerce;
pub mod validate;

pub use coerce::{coerce_document, coerce_submission};
pub use validate::{
    load_document, SchemaValidationError, SchemaValidator, ValidationViolations, Violation,
    ORDER_SCHEMA_NAME,
};
