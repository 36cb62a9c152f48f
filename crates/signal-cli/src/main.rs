//! Command-line front end for the signal analysis service

mod render;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use signal_client::formatter::{LOADING_MESSAGE, error_line};
use signal_client::params::{DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW};
use signal_client::suggestions::NO_MATCHES_MESSAGE;
use signal_client::{
    Action, AnalysisClient, AnalysisView, AppState, ClientConfig, Session, filter_suggestions,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "signal-cli")]
#[command(about = "Moving-average crossover analysis from the command line", long_about = None)]
struct Args {
    /// Base URL of the analysis service
    #[arg(long, global = true, env = "SIGNAL_API_BASE")]
    api_base: Option<String>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, global = true, env = "SIGNAL_TIMEOUT_SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a crossover analysis for a ticker
    Analyze(AnalyzeArgs),
    /// Search the service's ticker list by symbol or company name
    Search {
        query: String,
    },
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Ticker symbol, e.g. AAPL
    ticker: String,

    /// Start date (YYYY-MM-DD); defaults to two years ago
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    end: Option<String>,

    /// Short moving-average window, clamped to 5-100
    #[arg(long, default_value_t = i64::from(DEFAULT_SHORT_WINDOW), allow_negative_numbers = true)]
    short_window: i64,

    /// Long moving-average window, clamped to 20-500
    #[arg(long, default_value_t = i64::from(DEFAULT_LONG_WINDOW), allow_negative_numbers = true)]
    long_window: i64,

    /// Print the summary and Plotly chart descriptions as JSON
    #[arg(long)]
    json: bool,
}

fn build_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut builder = ClientConfig::builder();
    if let Some(base) = &args.api_base {
        builder = builder.api_base(base.clone());
    }
    if let Some(secs) = args.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    builder.build().context("invalid client configuration")
}

/// The finished result, or the line for the error panel
fn outcome(state: &AppState) -> Result<Option<&AnalysisView>, String> {
    match state.error() {
        Some(message) => Err(error_line(message)),
        None => Ok(state.result()),
    }
}

async fn analyze(client: AnalysisClient, args: AnalyzeArgs) -> anyhow::Result<ExitCode> {
    let AnalyzeArgs {
        ticker,
        start,
        end,
        short_window,
        long_window,
        json,
    } = args;

    let mut session = Session::new(client, AppState::default());
    session.dispatch(Action::SetTicker(ticker)).await;
    if let Some(start) = start {
        session.dispatch(Action::SetStartDate(start)).await;
    }
    if let Some(end) = end {
        session.dispatch(Action::SetEndDate(end)).await;
    }
    session.dispatch(Action::SetShortWindow(short_window)).await;
    session.dispatch(Action::SetLongWindow(long_window)).await;

    if !json {
        eprintln!("{LOADING_MESSAGE}");
    }
    session.submit().await;

    let view = match outcome(session.state()) {
        Ok(view) => view.context("analysis finished without a result")?,
        Err(line) => {
            eprintln!("{line}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if json {
        println!("{}", render::render_json(view)?);
    } else {
        println!("{}", render::render_text(view));
    }
    Ok(ExitCode::SUCCESS)
}

async fn search(client: AnalysisClient, query: &str) -> anyhow::Result<ExitCode> {
    let stocks = client
        .fetch_stocks()
        .await
        .context("failed to fetch the stock list")?;

    let matches = filter_suggestions(&stocks, query);
    if matches.is_empty() {
        println!("{NO_MATCHES_MESSAGE}");
    } else {
        println!("{}", render::suggestion_table(&matches));
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    signal_utils::init_tracing_with("warn,signal_client=info");

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(api_base = %config.api_base, "Starting signal-cli");

    let client = AnalysisClient::new(config)?;

    match args.command {
        Command::Search { query } => search(client, &query).await,
        Command::Analyze(analyze_args) => analyze(client, analyze_args).await,
    }
}
