//! # orderform CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use orderform_cli::check::{run_check, CheckArgs};
use orderform_cli::serve::{run_serve, ServeArgs};

/// Face mask order form: serve it, or check orders offline.
#[derive(Parser, Debug)]
#[command(name = "orderform", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the order form HTTP service.
    Serve(ServeArgs),

    /// Validate an order document (JSON or YAML).
    Check(CheckArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => run_serve(&args).await,
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderform_cli::StrategyArg;

    #[test]
    fn cli_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "orderform",
            "serve",
            "--port",
            "3000",
            "--strategy",
            "schema",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(3000));
                assert_eq!(args.host, None);
                assert_eq!(args.strategy, Some(StrategyArg::Schema));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_check_defaults_to_per_field() {
        let cli = Cli::try_parse_from(["orderform", "check", "order.yaml"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.file.to_str(), Some("order.yaml"));
                assert_eq!(args.strategy, StrategyArg::PerField);
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["orderform", "check", "o.json", "--strategy", "loose"]).is_err());
    }
}
