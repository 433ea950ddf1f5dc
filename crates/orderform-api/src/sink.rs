//! # Order Sinks
//!
//! The service delivers accepted orders to a [`SharedSink`]. The default
//! [`LoggingSink`] writes each order to the structured log.

use std::sync::Arc;

use orderform_core::{OrderPayload, OrderSink};

/// A sink shared across request handlers.
pub type SharedSink = Arc<dyn OrderSink + Send + Sync>;

/// Logs every accepted order at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

impl OrderSink for LoggingSink {
    fn accept(&self, order: OrderPayload) {
        match serde_json::to_string(&order) {
            Ok(json) => tracing::info!(order = %json, "order received"),
            Err(e) => tracing::error!(error = %e, "order received but could not be serialized"),
        }
    }
}
