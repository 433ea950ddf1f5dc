//! # orderform-cli: Order Form Command-Line Interface
//!
//! ## Subcommands
//!
//! - `serve`: Run the HTTP service
//! - `check`: Validate an order document (JSON or YAML) from disk
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation lives in `orderform-core` and
//!   `orderform-schema`, serving in `orderform-api`.
//! - Handlers return an exit code; hard failures surface as `anyhow` errors.

pub mod check;
pub mod serve;

use clap::ValueEnum;

use orderform_api::ValidationStrategy;

/// `--strategy` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Per-field rules, applied as each value is entered.
    PerField,
    /// One JSON Schema check over the whole order.
    Schema,
}

impl From<StrategyArg> for ValidationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::PerField => ValidationStrategy::PerField,
            StrategyArg::Schema => ValidationStrategy::Schema,
        }
    }
}
