//! rustforecast - next trading day direction for a ticker
//!
//! Prints the JSON response of the `predict` or `history` request to stdout.
//! Logs go to stderr.
//!
//! # Usage
//! ```sh
//! rustforecast predict --ticker AAPL --period 10y
//! rustforecast history --ticker ^GSPC --range 1y
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustforecast::config::Config;
use rustforecast::infrastructure::ServiceFactory;
use rustforecast::interfaces::api::{ApiError, ForecastApi, HistoryRequest, PredictRequest};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Next trading day stock direction forecast", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the ticker's history and predict the next session
    Predict {
        /// Ticker symbol (defaults to DEFAULT_TICKER)
        #[arg(short, long)]
        ticker: Option<String>,

        /// History period: 1d 5d 1mo 3mo 6mo 1y 2y 5y 10y ytd max
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Closing prices with period high and low
    History {
        /// Ticker symbol (defaults to DEFAULT_TICKER)
        #[arg(short, long)]
        ticker: Option<String>,

        /// Chart range: 1d 5d 1mo 3mo 6mo 1y 2y 5y 10y ytd max
        #[arg(short, long)]
        range: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}

fn print_outcome<T: Serialize>(outcome: Result<T, ApiError>) -> Result<()> {
    match outcome {
        Ok(response) => print_json(&response),
        Err(e) => {
            print_json(&e.body)?;
            anyhow::bail!("request failed with status {}", e.status)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: Provider={:?}, Trees={}, DefaultTicker={}",
        config.provider.kind, config.model.n_trees, config.default_ticker
    );

    let service = ServiceFactory::create_forecast_service(&config);
    let api = ForecastApi::new(service, config.default_ticker.clone(), config.default_period);

    match cli.command {
        Commands::Predict { ticker, period } => {
            print_outcome(api.predict(PredictRequest { ticker, period }).await)
        }
        Commands::History { ticker, range } => {
            print_outcome(api.history(HistoryRequest { ticker, range }).await)
        }
    }
}
