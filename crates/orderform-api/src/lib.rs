//! # orderform-api: Axum Service for the Order Form
//!
//! Serves the order form page and the JSON endpoints behind it, and hands
//! every accepted order to the configured [`OrderSink`](orderform_core::OrderSink).
//!
//! ## API Surface
//!
//! | Route | Module | Purpose |
//! |-------|--------|---------|
//! | `GET /` | [`routes::page`] | Order form page |
//! | `POST /orders` | [`routes::page`] | Form-encoded submission from the page |
//! | `GET /v1/form` | [`routes::fields`] | Initial form snapshot and control bounds |
//! | `POST /v1/fields/{field}/validate` | [`routes::fields`] | Per-field feedback |
//! | `POST /v1/orders` | [`routes::orders`] | JSON submission |
//! | `GET /openapi.json` | [`openapi`] | OpenAPI document |
//! | `GET /health/liveness` | here | Liveness probe |
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - No validation logic in handlers; they delegate to [`submit`], which
//!   delegates to `orderform-core` or `orderform-schema`.
//! - All errors map to structured responses via [`AppError`].

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod page;
pub mod routes;
pub mod sink;
pub mod state;
pub mod submit;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use sink::{LoggingSink, SharedSink};
pub use state::{AppConfig, AppState, ConfigError, ValidationStrategy};

/// Largest request body accepted. A full order is a few hundred bytes.
const BODY_LIMIT: usize = 64 * 1024;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health/liveness", get(liveness))
        .merge(routes::page::router())
        .merge(routes::fields::router())
        .merge(routes::orders::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health/liveness
async fn liveness() -> &'static str {
    "ok"
}
