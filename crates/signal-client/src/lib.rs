//! Client for a moving-average crossover analysis service
//!
//! The service computes moving averages, crossover signals and returns for
//! a ticker; this crate covers everything on the calling side:
//!
//! - Form parameters, default date range and ticker validation ([`params`])
//! - Ticker autocomplete over the service's reference list ([`suggestions`])
//! - Request/response adapter over HTTP ([`api`]), including the raw-text
//!   cleanup of `NaN` tokens the service emits ([`sanitize`])
//! - Mapping responses to chart series ([`chart`]) and summary rows
//!   ([`formatter`])
//! - An explicit screen state machine ([`state`]) and a driver that runs it
//!   against the service ([`session`])
//!
//! # Example
//!
//! ```rust,no_run
//! use signal_client::{Action, AnalysisClient, AppState, ClientConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> signal_client::Result<()> {
//!     let client = AnalysisClient::new(ClientConfig::from_env()?)?;
//!     let mut session = Session::new(client, AppState::default());
//!
//!     session.load_suggestions().await;
//!     session.dispatch(Action::SetTicker("MSFT".to_string())).await;
//!     session.submit().await;
//!
//!     if let Some(view) = session.state().result() {
//!         println!("{} charts for {}", view.charts.len(), view.ticker);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod params;
pub mod sanitize;
pub mod session;
pub mod state;
pub mod suggestions;

// Re-export main types for convenience
pub use api::{AnalysisClient, RawResponse, ReqwestTransport, Transport};
pub use chart::{ChartGroup, ChartSeries, SeriesStyle, to_chart_series};
pub use config::ClientConfig;
pub use error::{Result, SignalError};
pub use models::{AnalysisRequest, AnalysisResponse, SignalPoints, StockSuggestion, SummaryStats};
pub use params::{AnalysisParams, DateRange, derive_default_range, validate};
pub use session::Session;
pub use state::{Action, AnalysisView, AppState, Effect, Phase};
pub use suggestions::{SuggestionBox, SuggestionView, filter_suggestions};
