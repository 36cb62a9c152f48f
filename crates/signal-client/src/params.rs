//! Analysis form parameters
//!
//! Holds the five analysis inputs, derives the default date range and
//! performs the only pre-submit check the form has: a non-blank ticker.
//! Window ordering and date ordering are deliberately left to the server.

use crate::error::{Result, SignalError};
use crate::models::AnalysisRequest;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted range for the short moving-average window
pub const SHORT_WINDOW_RANGE: RangeInclusive<u32> = 5..=100;

/// Accepted range for the long moving-average window
pub const LONG_WINDOW_RANGE: RangeInclusive<u32> = 20..=500;

pub const DEFAULT_SHORT_WINDOW: u32 = 50;
pub const DEFAULT_LONG_WINDOW: u32 = 200;

/// Years between the default start and end dates
const DEFAULT_LOOKBACK_YEARS: i32 = 2;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Start and end of the analysis period, formatted `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// Format a date the way the analysis endpoint expects it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Default period: two calendar years back from `today` up to `today`
///
/// A Feb 29 that does not exist two years earlier rolls over to Mar 1.
pub fn derive_default_range(today: NaiveDate) -> DateRange {
    let year = today.year() - DEFAULT_LOOKBACK_YEARS;
    let start = today
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(today);

    DateRange {
        start_date: format_date(start),
        end_date: format_date(today),
    }
}

/// [`derive_default_range`] for the local calendar date
pub fn default_range_today() -> DateRange {
    derive_default_range(Local::now().date_naive())
}

/// Check the ticker is present
pub fn validate(ticker: &str) -> Result<()> {
    if ticker.trim().is_empty() {
        return Err(SignalError::MissingTicker);
    }
    Ok(())
}

fn clamp_to(value: i64, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

/// Clamp a short window into [`SHORT_WINDOW_RANGE`]
pub fn clamp_short_window(value: i64) -> u32 {
    clamp_to(value, &SHORT_WINDOW_RANGE)
}

/// Clamp a long window into [`LONG_WINDOW_RANGE`]
pub fn clamp_long_window(value: i64) -> u32 {
    clamp_to(value, &LONG_WINDOW_RANGE)
}

/// Current values of the analysis form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    short_window: u32,
    long_window: u32,
}

impl AnalysisParams {
    /// Empty ticker, default windows and the given date range
    pub fn new(range: DateRange) -> Self {
        Self {
            ticker: String::new(),
            start_date: range.start_date,
            end_date: range.end_date,
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
        }
    }

    /// Form state as it appears when first shown, relative to `today`
    pub fn for_date(today: NaiveDate) -> Self {
        Self::new(derive_default_range(today))
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = ticker.into();
        self
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_windows(mut self, short: i64, long: i64) -> Self {
        self.set_short_window(short);
        self.set_long_window(long);
        self
    }

    pub fn short_window(&self) -> u32 {
        self.short_window
    }

    pub fn long_window(&self) -> u32 {
        self.long_window
    }

    /// Set the short window, clamped into its accepted range
    pub fn set_short_window(&mut self, value: i64) {
        self.short_window = clamp_short_window(value);
    }

    /// Set the long window, clamped into its accepted range
    pub fn set_long_window(&mut self, value: i64) {
        self.long_window = clamp_long_window(value);
    }

    /// Validate the form before submission
    pub fn validate(&self) -> Result<()> {
        validate(&self.ticker)
    }

    /// Map the form onto the wire request. No value is transformed.
    pub fn build_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            ticker: self.ticker.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            short_window: self.short_window,
            long_window: self.long_window,
        }
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self::new(default_range_today())
    }
}
