//! Ticker autocomplete

use crate::models::StockSuggestion;

/// Placeholder row shown when the panel is open but nothing matches
pub const NO_MATCHES_MESSAGE: &str = "No matching stocks found";

/// Case-insensitive substring match on symbol or name
///
/// Keeps the input order. An empty query yields nothing.
pub fn filter_suggestions(all: &[StockSuggestion], query: &str) -> Vec<StockSuggestion> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    all.iter()
        .filter(|stock| {
            stock.symbol.to_lowercase().contains(&needle)
                || stock.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// What the suggestion panel should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionView {
    /// Panel closed, or the ticker is empty
    Hidden,
    /// Panel open with no match; render [`NO_MATCHES_MESSAGE`]
    NoMatches,
    Matches(Vec<StockSuggestion>),
}

/// Reference list plus open/closed state of the panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionBox {
    stocks: Vec<StockSuggestion>,
    open: bool,
}

impl SuggestionBox {
    pub fn new(stocks: Vec<StockSuggestion>) -> Self {
        Self { stocks, open: false }
    }

    /// Replace the reference list
    pub fn load(&mut self, stocks: Vec<StockSuggestion>) {
        self.stocks = stocks;
    }

    pub fn stocks(&self) -> &[StockSuggestion] {
        &self.stocks
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Typing into or focusing the ticker field opens the panel
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Render state for the current ticker text
    pub fn view(&self, ticker: &str) -> SuggestionView {
        if !self.open || ticker.is_empty() {
            return SuggestionView::Hidden;
        }

        let matches = filter_suggestions(&self.stocks, ticker);
        if matches.is_empty() {
            SuggestionView::NoMatches
        } else {
            SuggestionView::Matches(matches)
        }
    }

    /// Pick a suggestion; returns the symbol to put in the ticker field
    /// and closes the panel
    pub fn select(&mut self, stock: &StockSuggestion) -> String {
        self.open = false;
        stock.symbol.clone()
    }
}
