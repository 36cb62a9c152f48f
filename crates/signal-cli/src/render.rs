//! Terminal and JSON rendering of analysis results

use comfy_table::{Table, presets::UTF8_FULL};
use serde::Serialize;
use serde_json::Value;
use signal_client::formatter::{results_heading, summary_rows};
use signal_client::{AnalysisView, ChartGroup, StockSuggestion, SummaryStats};

/// Performance summary as a two-column table
pub fn summary_table(summary: &SummaryStats) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    for (label, value) in summary_rows(summary) {
        table.add_row(vec![label.to_string(), value]);
    }
    table
}

/// One line per chart series with its drawn point count
fn chart_overview(charts: &[ChartGroup]) -> String {
    let mut output = String::new();
    for chart in charts {
        output.push_str(&format!("{}\n", chart.title));
        for series in &chart.series {
            output.push_str(&format!(
                "  {:<16} {:>5} points\n",
                series.name,
                series.drawn_points()
            ));
        }
    }
    output
}

/// Full text rendering of a result
pub fn render_text(view: &AnalysisView) -> String {
    format!(
        "{}\n\nPerformance Summary\n{}\n\n{}",
        results_heading(&view.ticker),
        summary_table(&view.summary),
        chart_overview(&view.charts)
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ticker: &'a str,
    summary: &'a SummaryStats,
    charts: Vec<Value>,
}

/// Machine-readable rendering; charts are Plotly `{data, layout}` objects
pub fn render_json(view: &AnalysisView) -> serde_json::Result<String> {
    let report = JsonReport {
        ticker: &view.ticker,
        summary: &view.summary,
        charts: view.charts.iter().map(ChartGroup::to_plotly).collect(),
    };
    serde_json::to_string_pretty(&report)
}

/// Suggestion matches as a table
pub fn suggestion_table(stocks: &[StockSuggestion]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Symbol", "Name"]);
    for stock in stocks {
        table.add_row(vec![stock.symbol.clone(), stock.name.clone()]);
    }
    table
}
