//! FMP CLI - call Financial Modeling Prep endpoints from the shell

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use fmp_lib::{
    CallContext, Client, ClientConfig, OperationId, ParameterBag, RetryConfig, RetryEligibility,
};
use serde_json::Value;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fmp")]
#[command(about = "Call Financial Modeling Prep endpoints", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every operation identifier
    Operations,

    /// Call an operation and print the response body to stdout
    Call {
        /// Operation identifier, i.e. the endpoint path (e.g. /profile)
        #[arg(value_name = "OPERATION")]
        operation: String,

        /// Parameters: KEY=VALUE sends a string, KEY:=JSON sends a raw JSON
        /// value (numbers, booleans)
        #[arg(value_name = "PARAM", value_parser = parse_param)]
        params: Vec<(String, Value)>,

        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(clap::Args)]
struct ClientArgs {
    /// FMP API key
    #[arg(long, env = fmp_lib::config::API_KEY_ENV, hide_env_values = true)]
    api_key: String,

    /// Base URL override [default: first server of the API description]
    #[arg(long, env = "FMP_ENDPOINT")]
    endpoint: Option<String>,

    /// Log every request and response verbatim (includes the API key)
    #[arg(long)]
    debug: bool,

    /// Per-attempt timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// Overall deadline in seconds, retries included
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,

    /// Retries after the first attempt
    #[arg(long, default_value_t = fmp_lib::transport::DEFAULT_MAX_RETRIES)]
    retries: u32,

    /// Seconds to wait between attempts
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    wait: u64,

    /// Also retry 408, 429 and 5xx responses
    #[arg(long)]
    retry_server_errors: bool,
}

impl ClientArgs {
    fn config(&self) -> ClientConfig {
        let eligibility = if self.retry_server_errors {
            RetryEligibility::TransportAndServerErrors
        } else {
            RetryEligibility::TransportFailures
        };

        let mut config = ClientConfig::new(self.api_key.as_str())
            .with_debug(self.debug)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retry(
                RetryConfig::new(self.retries, Duration::from_secs(self.wait))
                    .with_eligibility(eligibility),
            );
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.as_str());
        }
        config
    }
}

/// Parses `KEY=VALUE` (string) or `KEY:=JSON` (raw JSON value).
fn parse_param(raw: &str) -> Result<(String, Value), String> {
    if let Some((key, json)) = raw.split_once(":=") {
        if !key.is_empty() && !key.contains('=') {
            let value = serde_json::from_str(json)
                .map_err(|e| format!("invalid JSON for '{key}': {e}"))?;
            return Ok((key.to_string(), value));
        }
    }

    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => {
            Ok((key.to_string(), Value::String(value.to_string())))
        }
        _ => Err(format!("expected KEY=VALUE or KEY:=JSON, got '{raw}'")),
    }
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool, debug: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => {
            let filter = match verbose {
                0 => "warn",
                1 => "warn,fmp_lib=info",
                2 => "info,fmp_lib=debug",
                _ => "debug,fmp_lib=trace",
            };
            // --debug output is logged at debug level; make sure it shows.
            if debug && verbose < 2 {
                format!("{filter},fmp_lib=debug")
            } else {
                filter.to_string()
            }
        }
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn list_operations() {
    let width = OperationId::ALL
        .iter()
        .map(|op| op.path().len())
        .max()
        .unwrap_or(0);
    for op in OperationId::ALL {
        println!("{:<width$}  {}", op.path(), op.operation_id());
    }
}

async fn call(operation: &str, params: Vec<(String, Value)>, args: &ClientArgs) -> ExitCode {
    let client = match Client::new(args.config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = CallContext::background();
    if let Some(secs) = args.deadline {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    let canceller = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling request");
            canceller.cancel();
        }
    });

    let bag: ParameterBag = params.into_iter().collect();
    tracing::info!(operation, params = bag.len(), "Dispatching");

    match client.dispatch(&ctx, operation, &bag).await {
        Ok(response) => {
            eprintln!("{}", response.status_line());
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout
                .write_all(response.body())
                .and_then(|()| stdout.flush())
            {
                eprintln!("Failed to write response: {e}");
                return ExitCode::FAILURE;
            }
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) if e.is_cancellation() => {
            eprintln!("Cancelled: {e}");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let debug = matches!(&cli.command, Commands::Call { client, .. } if client.debug);
    init_tracing(cli.log_verbosity, cli.json, debug);

    match cli.command {
        Commands::Operations => {
            list_operations();
            ExitCode::SUCCESS
        }
        Commands::Call {
            operation,
            params,
            client,
        } => call(&operation, params, &client).await,
    }
}
