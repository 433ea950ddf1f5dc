//! # Serve Subcommand
//!
//! Starts the order form service. Configuration comes from `ORDERFORM_*`
//! environment variables; flags given on the command line win.

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Args;

use orderform_api::{AppConfig, AppState};

use crate::StrategyArg;

/// Arguments for the serve subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides ORDERFORM_HOST).
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to bind (overrides ORDERFORM_PORT).
    #[arg(long)]
    pub port: Option<u16>,

    /// Validation strategy (overrides ORDERFORM_STRATEGY).
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

impl ServeArgs {
    /// Layer the flags that were given over `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        config
    }
}

/// Execute the serve subcommand. Runs until interrupted.
pub async fn run_serve(args: &ServeArgs) -> Result<u8> {
    let config = args.apply(AppConfig::from_env().context("invalid configuration")?);
    let addr = config.socket_addr();
    let strategy = config.strategy;

    let state = AppState::with_logging_sink(config).context("failed to compile order schema")?;
    let app = orderform_api::app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, %strategy, "order form listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("could not install Ctrl-C handler");
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("server error")?;

    tracing::info!("order form stopped");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderform_api::ValidationStrategy;

    #[test]
    fn flags_override_config() {
        let args = ServeArgs {
            host: Some("127.0.0.1".parse().unwrap()),
            port: None,
            strategy: Some(StrategyArg::Schema),
        };
        let config = args.apply(AppConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.strategy, ValidationStrategy::Schema);
    }

    #[test]
    fn no_flags_keeps_config() {
        let base = AppConfig {
            port: 9000,
            ..AppConfig::default()
        };
        assert_eq!(ServeArgs::default().apply(base.clone()), base);
    }
}
