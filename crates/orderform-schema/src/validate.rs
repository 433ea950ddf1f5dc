//! # Schema Validation
//!
//! Batch validation of an order submission against the embedded
//! `order.schema.json` (Draft 2020-12).
//!
//! ## Rules expressed by the schema
//!
//! - All five fields are required; unknown keys are rejected.
//! - Names are non-empty strings.
//! - `email` is a non-empty string in `email` format (format assertions
//!   are switched on when the validator is built) whose domain is an
//!   IPv4 literal or dotted labels ending in a TLD of two or more letters.
//! - `color` is one of the offered colors.
//! - `quantity` is an integer in `[1, 5]`.
//!
//! Every violation is collected, not just the first, so callers can flag
//! every offending control at once.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use orderform_core::{FieldKind, OrderPayload};

use crate::coerce::{coerce_document, coerce_submission};

/// Name under which the embedded order schema is reported.
pub const ORDER_SCHEMA_NAME: &str = "order.schema.json";

const ORDER_SCHEMA: &str = include_str!("../schemas/order.schema.json");

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema source could not be parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        schema_name: String,
        reason: String,
    },

    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        schema_name: String,
        reason: String,
    },

    /// A document passed the schema but did not decode into an order.
    #[error("validated document does not decode into an order: {0}")]
    PayloadDecode(String),
}

impl SchemaValidationError {
    /// Form fields named by the violations, if this is a validation failure.
    pub fn invalid_fields(&self) -> Vec<FieldKind> {
        match self {
            Self::ValidationFailed { violations, .. } => violations.fields(),
            _ => Vec::new(),
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The form field this violation concerns, when it maps onto one.
    pub field: Option<FieldKind>,
}

impl Violation {
    fn new(instance_path: String, schema_path: String, message: String) -> Self {
        let field = field_for(&instance_path, &schema_path, &message);
        Self {
            instance_path,
            schema_path,
            message,
            field,
        }
    }
}

/// Resolve the form field a violation is about.
///
/// Property-level violations carry the field in their instance path
/// (`/email`). `required` violations sit at the root and name the missing
/// property in quotes at the start of the message.
fn field_for(instance_path: &str, schema_path: &str, message: &str) -> Option<FieldKind> {
    if let Some(name) = instance_path.strip_prefix('/') {
        let head = name.split('/').next().unwrap_or(name);
        return head.parse().ok();
    }
    if schema_path.ends_with("/required") {
        let quoted = message.strip_prefix('"')?;
        let end = quoted.find('"')?;
        return quoted[..end].parse().ok();
    }
    None
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Distinct form fields named by the violations, in form order.
    pub fn fields(&self) -> Vec<FieldKind> {
        self.violations
            .iter()
            .filter_map(|v| v.field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled order schema.
///
/// `SchemaValidator` is `Send + Sync`; build it once and share it.
pub struct SchemaValidator {
    schema_name: String,
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile the embedded order schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaLoadError` if the embedded source is not JSON and
    /// `ValidatorBuildError` if it does not compile.
    pub fn new() -> Result<Self, SchemaValidationError> {
        let schema: Value = serde_json::from_str(ORDER_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: ORDER_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::with_schema(ORDER_SCHEMA_NAME, schema)
    }

    /// Compile an arbitrary schema under `schema_name`.
    pub fn with_schema(
        schema_name: impl Into<String>,
        schema: Value,
    ) -> Result<Self, SchemaValidationError> {
        let schema_name = schema_name.into();

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(true);

        let validator = opts.build(&schema).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            schema_name,
            schema,
            validator,
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The schema source this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate an already-coerced document.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` carrying every violation.
    pub fn validate_document(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| {
                Violation::new(
                    e.instance_path.to_string(),
                    e.schema_path.to_string(),
                    e.to_string(),
                )
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations },
            })
        }
    }

    /// Coerce, validate and decode a raw form submission.
    pub fn validate_submission<I, K, V>(&self, raw: I) -> Result<OrderPayload, SchemaValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.validate_value(coerce_submission(raw))
    }

    /// Coerce, validate and decode a parsed document.
    pub fn validate_value(&self, document: Value) -> Result<OrderPayload, SchemaValidationError> {
        let document = coerce_document(document);
        self.validate_document(&document)?;
        serde_json::from_value(document)
            .map_err(|e| SchemaValidationError::PayloadDecode(e.to_string()))
    }

    /// Load an order document from `path` and validate it.
    ///
    /// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
    pub fn validate_file(&self, path: &Path) -> Result<OrderPayload, SchemaValidationError> {
        self.validate_value(load_document(path)?)
    }
}

/// Read a JSON or YAML document from disk, choosing the parser by extension.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => serde_yaml::from_str::<Value>(&content)
            .map_err(|e| load_error(format!("invalid YAML: {e}"))),
        _ => serde_json::from_str::<Value>(&content)
            .map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}
