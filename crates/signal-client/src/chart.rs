//! Mapping of an analysis response onto chartable series
//!
//! Two groups are produced: price with both moving averages and the
//! crossover markers, and cumulative returns in percent. Every series is
//! plotted against dates; `dates` itself is never trimmed or padded, so a
//! short series simply draws a partial line.

use serde::Serialize;
use serde_json::{Value, json};

use crate::models::AnalysisResponse;

pub const PRICE_CHART_TITLE: &str = "Price and Signals";
pub const RETURNS_CHART_TITLE: &str = "Cumulative Returns";

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStyle {
    Line,
    DottedLine,
    MarkerUp,
    MarkerDown,
}

impl SeriesStyle {
    pub fn is_marker(self) -> bool {
        matches!(self, Self::MarkerUp | Self::MarkerDown)
    }
}

/// One plotted series; `None` in `y` is a gap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub style: SeriesStyle,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
}

impl ChartSeries {
    fn new(name: &str, style: SeriesStyle, x: &[String], y: Vec<Option<f64>>) -> Self {
        Self {
            name: name.to_string(),
            style,
            x: x.to_vec(),
            y,
        }
    }

    /// Number of points that will actually be drawn
    pub fn drawn_points(&self) -> usize {
        self.x.iter().zip(&self.y).filter(|(_, y)| y.is_some()).count()
    }

    /// Plotly trace for this series
    pub fn to_trace(&self) -> Value {
        let mut trace = json!({
            "type": "scatter",
            "name": self.name,
            "x": self.x,
            "y": self.y,
            "connectgaps": false,
        });

        match self.style {
            SeriesStyle::Line => {
                trace["mode"] = json!("lines");
            }
            SeriesStyle::DottedLine => {
                trace["mode"] = json!("lines");
                trace["line"] = json!({"dash": "dot"});
            }
            SeriesStyle::MarkerUp => {
                trace["mode"] = json!("markers");
                trace["marker"] = json!({"symbol": "triangle-up", "size": 10, "color": "green"});
            }
            SeriesStyle::MarkerDown => {
                trace["mode"] = json!("markers");
                trace["marker"] = json!({"symbol": "triangle-down", "size": 10, "color": "red"});
            }
        }

        trace
    }
}

/// A titled chart with a shared date axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGroup {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub series: Vec<ChartSeries>,
}

impl ChartGroup {
    pub fn series_named(&self, name: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Plotly `{data, layout}` description
    pub fn to_plotly(&self) -> Value {
        json!({
            "data": self.series.iter().map(ChartSeries::to_trace).collect::<Vec<_>>(),
            "layout": {
                "title": {"text": self.title},
                "xaxis": {"title": {"text": self.x_axis_title}},
                "yaxis": {"title": {"text": self.y_axis_title}},
                "autosize": true,
                "margin": {"l": 50, "r": 20, "t": 30, "b": 50},
            },
        })
    }
}

/// Fraction to percent, keeping gaps as gaps
fn to_percent(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| v.filter(|f| f.is_finite()).map(|f| f * 100.0))
        .collect()
}

/// Build the price and returns chart groups for a response
pub fn to_chart_series(response: &AnalysisResponse) -> Vec<ChartGroup> {
    let dates = &response.dates;

    let price = ChartGroup {
        title: PRICE_CHART_TITLE.to_string(),
        x_axis_title: "Date".to_string(),
        y_axis_title: "Price".to_string(),
        series: vec![
            ChartSeries::new("Price", SeriesStyle::Line, dates, response.prices.clone()),
            ChartSeries::new("Short MA", SeriesStyle::DottedLine, dates, response.short_ma.clone()),
            ChartSeries::new("Long MA", SeriesStyle::DottedLine, dates, response.long_ma.clone()),
            ChartSeries::new(
                "Buy Signal",
                SeriesStyle::MarkerUp,
                &response.buy_signals.dates,
                response.buy_signals.prices.clone(),
            ),
            ChartSeries::new(
                "Sell Signal",
                SeriesStyle::MarkerDown,
                &response.sell_signals.dates,
                response.sell_signals.prices.clone(),
            ),
        ],
    };

    let returns = ChartGroup {
        title: RETURNS_CHART_TITLE.to_string(),
        x_axis_title: "Date".to_string(),
        y_axis_title: "Return (%)".to_string(),
        series: vec![
            ChartSeries::new(
                "Market Return",
                SeriesStyle::Line,
                dates,
                to_percent(&response.market_returns),
            ),
            ChartSeries::new(
                "Strategy Return",
                SeriesStyle::Line,
                dates,
                to_percent(&response.strategy_returns),
            ),
        ],
    };

    vec![price, returns]
}
