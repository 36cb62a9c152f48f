//! UI state and its transitions
//!
//! All mutable state of the analysis screen lives in [`AppState`] and is
//! changed only through [`AppState::update`]. Updates that require I/O
//! return an [`Effect`] for the caller to run; the outcome comes back in as
//! another [`Action`].
//!
//! Each submission is tagged with a sequence number. A completion is only
//! applied when it carries the latest issued number, so a slow response to
//! an earlier submission can never overwrite a newer one.

use tracing::debug;

use crate::chart::{ChartGroup, to_chart_series};
use crate::models::{AnalysisRequest, AnalysisResponse, StockSuggestion, SummaryStats};
use crate::params::AnalysisParams;
use crate::suggestions::{SuggestionBox, SuggestionView};

/// Where the screen is in the submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting { seq: u64 },
}

/// A successful analysis, ready to display
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    /// Ticker as it was submitted
    pub ticker: String,
    pub summary: SummaryStats,
    pub charts: Vec<ChartGroup>,
}

impl AnalysisView {
    pub fn new(ticker: impl Into<String>, response: &AnalysisResponse) -> Self {
        Self {
            ticker: ticker.into(),
            summary: response.summary.clone(),
            charts: to_chart_series(response),
        }
    }
}

/// Events fed into [`AppState::update`]
#[derive(Debug, Clone)]
pub enum Action {
    /// Ticker text edited; opens the suggestion panel
    SetTicker(String),
    /// Ticker field focused
    FocusTicker,
    SetStartDate(String),
    SetEndDate(String),
    SetShortWindow(i64),
    SetLongWindow(i64),
    /// Reference list arrived
    SuggestionsLoaded(Vec<StockSuggestion>),
    SelectSuggestion(StockSuggestion),
    Submit,
    /// An analyze call finished
    Completed {
        seq: u64,
        outcome: Result<AnalysisResponse, String>,
    },
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Analyze { seq: u64, request: AnalysisRequest },
}

/// Complete state of the analysis screen
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub params: AnalysisParams,
    pub suggestions: SuggestionBox,
    phase: Phase,
    /// Ticker of the in-flight submission, used for the results heading
    pending_ticker: Option<String>,
    result: Option<AnalysisView>,
    error: Option<String>,
    last_seq: u64,
}

impl AppState {
    pub fn new(params: AnalysisParams) -> Self {
        Self {
            params,
            suggestions: SuggestionBox::default(),
            phase: Phase::Idle,
            pending_ticker: None,
            result: None,
            error: None,
            last_seq: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn result(&self) -> Option<&AnalysisView> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sequence number of the most recent submission
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    pub fn suggestion_view(&self) -> SuggestionView {
        self.suggestions.view(&self.params.ticker)
    }

    /// Apply an action and return the effect it requires
    pub fn update(&mut self, action: Action) -> Effect {
        match action {
            Action::SetTicker(ticker) => {
                self.params.ticker = ticker;
                self.suggestions.open();
            }
            Action::FocusTicker => self.suggestions.open(),
            Action::SetStartDate(date) => self.params.start_date = date,
            Action::SetEndDate(date) => self.params.end_date = date,
            Action::SetShortWindow(value) => self.params.set_short_window(value),
            Action::SetLongWindow(value) => self.params.set_long_window(value),
            Action::SuggestionsLoaded(stocks) => self.suggestions.load(stocks),
            Action::SelectSuggestion(stock) => {
                self.params.ticker = self.suggestions.select(&stock);
            }
            Action::Submit => return self.submit(),
            Action::Completed { seq, outcome } => self.complete(seq, outcome),
        }
        Effect::None
    }

    fn submit(&mut self) -> Effect {
        if let Err(e) = self.params.validate() {
            self.error = Some(e.to_string());
            return Effect::None;
        }

        if let Phase::Submitting { seq } = self.phase {
            debug!(superseded = seq, "Submitting while a request is in flight");
        }

        self.last_seq += 1;
        let seq = self.last_seq;
        self.phase = Phase::Submitting { seq };
        self.pending_ticker = Some(self.params.ticker.clone());
        self.result = None;
        self.error = None;

        Effect::Analyze {
            seq,
            request: self.params.build_request(),
        }
    }

    fn complete(&mut self, seq: u64, outcome: Result<AnalysisResponse, String>) {
        if seq != self.last_seq || self.phase != (Phase::Submitting { seq }) {
            debug!(seq, latest = self.last_seq, "Discarding stale analysis result");
            return;
        }

        let ticker = self.pending_ticker.take().unwrap_or_default();
        match outcome {
            Ok(response) => {
                self.result = Some(AnalysisView::new(ticker, &response));
                self.error = None;
            }
            Err(message) => {
                self.result = None;
                self.error = Some(message);
            }
        }
        self.phase = Phase::Idle;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AnalysisParams::default())
    }
}
