//! Display formatting for analysis results

use crate::models::SummaryStats;

pub const LOADING_MESSAGE: &str = "Analyzing stock data... This may take a moment.";

const MISSING_VALUE: &str = "N/A";

/// Heading shown above a result
pub fn results_heading(ticker: &str) -> String {
    format!("Analysis Results for {ticker}")
}

/// Line shown in the error panel
pub fn error_line(message: &str) -> String {
    format!("Error: {message}")
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| format!("{v}%"))
}

/// Label/value rows of the performance summary card
///
/// Values are rendered exactly as the service sent them; percentages get a
/// `%` suffix and nothing is rounded.
pub fn summary_rows(summary: &SummaryStats) -> Vec<(&'static str, String)> {
    vec![
        (
            "Period",
            format!("{} to {}", summary.period_start, summary.period_end),
        ),
        ("Total Trades", count(summary.total_trades)),
        ("Buy Signals", count(summary.buy_signals)),
        ("Sell Signals", count(summary.sell_signals)),
        ("Market Return", percent(summary.market_return)),
        ("Strategy Return", percent(summary.strategy_return)),
        ("Annual Market Return", percent(summary.market_annual_return)),
        ("Annual Strategy Return", percent(summary.strategy_annual_return)),
        ("Sharpe Ratio", number(summary.sharpe_ratio)),
    ]
}
