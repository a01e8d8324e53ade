//! Command-line client for the Buckaroo NVP payment gateway.
//!
//! # Usage
//!
//! ```bash
//! # Look up a transaction on the test gateway
//! brq --test status 4C1BE53E2C42412AB32A799D9316E7DD
//!
//! # Start a payment and print the redirect URL
//! brq pay --amount 10.00 --invoice INV-1 --description "Order 1"
//!
//! # Check a push notification body saved to a file (or piped on stdin)
//! brq verify-push push.txt
//!
//! # Configure logging level
//! RUST_LOG=debug brq status 4C1BE53E2C42412AB32A799D9316E7DD
//! ```
//!
//! # Environment Variables
//!
//! - `BRQ_CONFIG` - Path to TOML configuration file (default: `brq.toml`)
//! - `BRQ_*` - Individual settings, see [`config`]
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

mod config;

use std::path::{Path, PathBuf};

use brq::{Environment, FieldMap, PaymentRequest, RefundInfoRequest, Response, ResponseKind};
use brq_http::GatewayClient;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "brq", version, about = "Buckaroo NVP gateway client")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        long,
        global = true,
        env = "BRQ_CONFIG",
        default_value = config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    /// Use the test gateway regardless of the configuration.
    #[arg(long, global = true)]
    test: bool,

    /// Log request and response fields.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up the status of a transaction.
    Status {
        /// Transaction key returned by the gateway.
        transaction_id: String,
    },
    /// Start a payment.
    Pay {
        /// Amount to charge, e.g. `10.00`.
        #[arg(long)]
        amount: Decimal,
        /// Merchant invoice number.
        #[arg(long)]
        invoice: String,
        /// Description shown to the consumer.
        #[arg(long)]
        description: String,
        /// Return URL for this payment; defaults to `callback_url`.
        #[arg(long)]
        return_url: Option<Url>,
        /// Payment methods to offer, comma separated.
        #[arg(long)]
        services: Option<String>,
    },
    /// Ask which refunds are possible for a transaction.
    RefundInfo {
        /// Transaction key returned by the gateway.
        transaction_id: String,
    },
    /// Verify a push notification body read from a file or stdin.
    VerifyPush {
        /// File holding the form-encoded body; stdin when omitted.
        file: Option<PathBuf>,
    },
}

/// What gets printed for every response.
#[derive(Serialize)]
struct Report<'a> {
    kind: ResponseKind,
    status: Option<u16>,
    description: Option<&'static str>,
    valid: bool,
    redirect_url: Option<&'a str>,
    fields: &'a FieldMap,
}

impl<'a> From<&'a Response> for Report<'a> {
    fn from(response: &'a Response) -> Self {
        Self {
            kind: response.kind(),
            status: response.status(),
            description: response.status_code().and_then(|code| code.description()),
            valid: response.is_valid(),
            redirect_url: response.redirect_url(),
            fields: response.fields(),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!("brq failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config::load(&cli.config)?;
    if cli.test {
        config.environment = Environment::Test;
    }
    config.debug |= cli.debug;
    tracing::info!(
        environment = %config.environment,
        gateway = config.gateway_url(),
        "Loaded configuration"
    );

    let client = GatewayClient::new(config);
    let response = match cli.command {
        Command::Status { transaction_id } => client.status(&transaction_id).await?,
        Command::Pay {
            amount,
            invoice,
            description,
            return_url,
            services,
        } => {
            let mut request = PaymentRequest::new()
                .with_amount(amount)
                .with_invoice_number(invoice)
                .with_description(description);
            request.return_url = return_url;
            request.requested_services = services;
            client.request_payment(&request).await?
        }
        Command::RefundInfo { transaction_id } => {
            client
                .request_refund_info(&RefundInfoRequest::new(transaction_id))
                .await?
        }
        Command::VerifyPush { file } => {
            let body = read_body(file.as_deref()).await?;
            let response = client.push_notification(body.trim_end())?;
            print_report(&response)?;
            if !response.is_valid() {
                return Err("push notification signature does not match".into());
            }
            return Ok(());
        }
    };

    print_report(&response)?;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_report(response: &Response) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&Report::from(response))?);
    Ok(())
}

async fn read_body(file: Option<&Path>) -> std::io::Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut body = String::new();
            tokio::io::stdin().read_to_string(&mut body).await?;
            Ok(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "brq",
            "status",
            "TX-1",
            "--config",
            "other.toml",
            "--test",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(cli.test);
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Command::Status { transaction_id } if transaction_id == "TX-1"
        ));
    }

    #[test]
    fn test_config_flag_before_subcommand() {
        let cli = Cli::try_parse_from(["brq", "--config", "other.toml", "refund-info", "TX-1"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(!cli.test);
    }
}
