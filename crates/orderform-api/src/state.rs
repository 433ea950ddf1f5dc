//! # Application State
//!
//! Configuration and the shared, read-only services every handler needs:
//! the compiled order schema and the order sink.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use orderform_schema::{SchemaValidationError, SchemaValidator};

use crate::sink::{LoggingSink, SharedSink};

/// Which validation strategy decides whether a submission is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationStrategy {
    /// Per-field rules from `orderform-core`, applied to every value.
    #[default]
    PerField,
    /// One batch check against the embedded JSON Schema.
    Schema,
}

impl ValidationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerField => "per-field",
            Self::Schema => "schema",
        }
    }
}

impl std::fmt::Display for ValidationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-field" => Ok(Self::PerField),
            "schema" => Ok(Self::Schema),
            other => Err(ConfigError::Invalid {
                var: STRATEGY_VAR,
                value: other.to_string(),
                reason: "expected \"per-field\" or \"schema\"".to_string(),
            }),
        }
    }
}

const HOST_VAR: &str = "ORDERFORM_HOST";
const PORT_VAR: &str = "ORDERFORM_PORT";
const STRATEGY_VAR: &str = "ORDERFORM_STRATEGY";

/// Error reading configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to bind the HTTP server to.
    pub host: IpAddr,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Strategy used to accept or reject submissions.
    pub strategy: ValidationStrategy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            strategy: ValidationStrategy::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from `ORDERFORM_*` environment variables.
    ///
    /// Unset variables fall back to [`AppConfig::default`]. Set but
    /// unparseable variables are an error rather than silently ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup(HOST_VAR) {
            Some(v) => v.parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                var: HOST_VAR,
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.host,
        };

        let port = match lookup(PORT_VAR) {
            Some(v) => v.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT_VAR,
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        let strategy = match lookup(STRATEGY_VAR) {
            Some(v) => v.parse::<ValidationStrategy>()?,
            None => defaults.strategy,
        };

        Ok(Self {
            host,
            port,
            strategy,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub schema: Arc<SchemaValidator>,
    pub sink: SharedSink,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build state with an explicit sink.
    ///
    /// # Errors
    ///
    /// Fails if the embedded order schema does not compile.
    pub fn try_new(config: AppConfig, sink: SharedSink) -> Result<Self, SchemaValidationError> {
        Ok(Self {
            config,
            schema: Arc::new(SchemaValidator::new()?),
            sink,
        })
    }

    /// Build state that logs every accepted order.
    pub fn with_logging_sink(config: AppConfig) -> Result<Self, SchemaValidationError> {
        Self::try_new(config, Arc::new(LoggingSink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| vars.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_all_vars() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ORDERFORM_HOST", "127.0.0.1"),
            ("ORDERFORM_PORT", "3000"),
            ("ORDERFORM_STRATEGY", "schema"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.strategy, ValidationStrategy::Schema);
    }

    #[test]
    fn rejects_bad_port() {
        let err = AppConfig::from_lookup(lookup(&[("ORDERFORM_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "ORDERFORM_PORT", .. }));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err =
            AppConfig::from_lookup(lookup(&[("ORDERFORM_STRATEGY", "yup")])).unwrap_err();
        assert!(err.to_string().contains("ORDERFORM_STRATEGY"));
    }

    #[test]
    fn strategy_roundtrip() {
        for s in [ValidationStrategy::PerField, ValidationStrategy::Schema] {
            assert_eq!(s.as_str().parse::<ValidationStrategy>().unwrap(), s);
        }
    }
}
