//! Wire types exchanged with the analysis service

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    pub short_window: u32,
    pub long_window: u32,
}

/// Entry of the `GET /api/stocks` reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSuggestion {
    pub symbol: String,
    pub name: String,
}

impl StockSuggestion {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Headline statistics computed by the service
///
/// Numeric fields are `None` when the service sent `NaN`/`null`, e.g. a
/// Sharpe ratio over a flat return series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub period_start: String,
    pub period_end: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_trades: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub buy_signals: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub sell_signals: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub market_return: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub strategy_return: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub market_annual_return: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub strategy_annual_return: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sharpe_ratio: Option<f64>,
}

/// Dates and prices at which the crossover fired
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalPoints {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub prices: Vec<Option<f64>>,
}

impl SignalPoints {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Successful body of `POST /api/analyze`
///
/// Numeric series are index-aligned with `dates`. A `None` entry is a
/// position where the value is undefined (for instance before a moving
/// average window has filled) and must be drawn as a gap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub summary: SummaryStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub prices: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub short_ma: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub long_ma: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub market_returns: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub strategy_returns: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buy_signals: SignalPoints,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sell_signals: SignalPoints,
}

/// Only finite JSON numbers are values; anything else is a gap
fn finite(value: &serde_json::Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(finite(&value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64())
}

/// `null` decodes like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_series<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values.unwrap_or_default().iter().map(finite).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case() {
        let request = AnalysisRequest {
            ticker: "MSFT".to_string(),
            start_date: "2023-01-01".to_string(),
            end_date: "2024-01-01".to_string(),
            short_window: 50,
            long_window: 200,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "ticker": "MSFT",
                "startDate": "2023-01-01",
                "endDate": "2024-01-01",
                "shortWindow": 50,
                "longWindow": 200,
            })
        );
    }

    #[test]
    fn test_response_nulls_and_strings_become_gaps() {
        let value = json!({
            "summary": {
                "period_start": "2023-01-03",
                "period_end": "2023-12-29",
                "total_trades": 3,
                "buy_signals": 2,
                "sell_signals": 1,
                "market_return": 12.5,
                "strategy_return": 8.25,
                "market_annual_return": 12.4,
                "strategy_annual_return": 8.2,
                "sharpe_ratio": null
            },
            "dates": ["2023-01-03", "2023-01-04", "2023-01-05"],
            "prices": [100.0, 101.5, 99.0],
            "short_ma": [null, null, 100.17],
            "long_ma": [null, "n/a", null],
            "market_returns": [0.0, 0.015, -0.01],
            "strategy_returns": [0.0, 0.0, 0.0],
            "buy_signals": {"dates": ["2023-01-05"], "prices": [99.0]},
            "sell_signals": {"dates": [], "prices": []}
        });

        let response: AnalysisResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.summary.total_trades, Some(3));
        assert_eq!(response.summary.sharpe_ratio, None);
        assert_eq!(response.short_ma, vec![None, None, Some(100.17)]);
        assert_eq!(response.long_ma, vec![None, None, None]);
        assert_eq!(response.buy_signals.len(), 1);
        assert!(response.sell_signals.is_empty());
    }

    #[test]
    fn test_missing_series_default_to_empty() {
        let value = json!({
            "summary": {"period_start": "2023-01-03", "period_end": "2023-12-29"},
            "dates": ["2023-01-03"],
            "prices": null
        });

        let response: AnalysisResponse = serde_json::from_value(value).unwrap();
        assert!(response.prices.is_empty());
        assert!(response.market_returns.is_empty());
        assert_eq!(response.summary.market_return, None);
    }

    #[test]
    fn test_null_counts_and_signal_groups_decode() {
        let raw = r#"{
            "summary": {
                "period_start": "2023-01-03",
                "period_end": "2023-12-29",
                "total_trades": NaN,
                "buy_signals": null,
                "sell_signals": 1
            },
            "dates": null,
            "buy_signals": null,
            "sell_signals": {"dates": null, "prices": [NaN]}
        }"#;

        let response: AnalysisResponse = crate::sanitize::parse(raw).unwrap();
        assert_eq!(response.summary.total_trades, None);
        assert_eq!(response.summary.buy_signals, None);
        assert_eq!(response.summary.sell_signals, Some(1));
        assert!(response.dates.is_empty());
        assert!(response.buy_signals.is_empty());
        assert!(response.sell_signals.dates.is_empty());
        assert_eq!(response.sell_signals.prices, vec![None]);
    }
}
