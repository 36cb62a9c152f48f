//! Drives [`AppState`] against a live [`AnalysisClient`]

use tracing::{info, warn};

use crate::api::AnalysisClient;
use crate::state::{Action, AppState, Effect};

/// An interactive analysis session
///
/// Owns the screen state and runs the effects its transitions request.
#[derive(Debug)]
pub struct Session {
    client: AnalysisClient,
    state: AppState,
}

impl Session {
    pub fn new(client: AnalysisClient, state: AppState) -> Self {
        Self { client, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Populate the suggestion list
    ///
    /// Failures are logged and otherwise ignored; the list stays empty.
    pub async fn load_suggestions(&mut self) {
        match self.client.fetch_stocks().await {
            Ok(stocks) => {
                self.state.update(Action::SuggestionsLoaded(stocks));
            }
            Err(e) => warn!(error = %e, "Error fetching popular stocks"),
        }
    }

    /// Apply a state action, running any effect to completion
    pub async fn dispatch(&mut self, action: Action) {
        let effect = self.state.update(action);
        self.run(effect).await;
    }

    /// Shortcut for `dispatch(Action::Submit)`
    pub async fn submit(&mut self) {
        self.dispatch(Action::Submit).await;
    }

    async fn run(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Analyze { seq, request } => {
                info!(ticker = %request.ticker, seq, "Submitting analysis");
                let outcome = self
                    .client
                    .analyze(&request)
                    .await
                    .map_err(|e| e.to_string());
                self.state.update(Action::Completed { seq, outcome });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{MockTransport, RawResponse};
    use crate::chart::{PRICE_CHART_TITLE, RETURNS_CHART_TITLE};
    use crate::config::ClientConfig;
    use crate::formatter::summary_rows;
    use crate::params::AnalysisParams;
    use crate::state::Phase;
    use crate::suggestions::SuggestionView;
    use chrono::NaiveDate;
    use std::sync::Arc;

    const ANALYZE_BODY: &str = r#"{
        "summary": {
            "period_start": "2023-01-03",
            "period_end": "2023-12-29",
            "total_trades": 3,
            "buy_signals": 2,
            "sell_signals": 1,
            "market_return": 56.8,
            "strategy_return": 31.2,
            "market_annual_return": 57.3,
            "strategy_annual_return": 31.5,
            "sharpe_ratio": 1.42
        },
        "dates": ["2023-01-03", "2023-01-04", "2023-01-05"],
        "prices": [239.58, 229.1, 222.31],
        "short_ma": [NaN, NaN, 230.33],
        "long_ma": [NaN, NaN, NaN],
        "market_returns": [0.0, -0.0437, -0.0721],
        "strategy_returns": [0.0, 0.0, NaN],
        "buy_signals": {"dates": ["2023-01-05"], "prices": [222.31]},
        "sell_signals": {"dates": [], "prices": []}
    }"#;

    fn session(mock: MockTransport) -> Session {
        let client = AnalysisClient::with_transport(ClientConfig::default(), Arc::new(mock));
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Session::new(client, AppState::new(AnalysisParams::for_date(today)))
    }

    fn network_error() -> crate::error::SignalError {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("an unparseable URL cannot build a request");
        crate::error::SignalError::NetworkFailure(err)
    }

    async fn fill_msft(session: &mut Session) {
        session.dispatch(Action::SetTicker("MSFT".to_string())).await;
        session.dispatch(Action::SetStartDate("2023-01-01".to_string())).await;
        session.dispatch(Action::SetEndDate("2024-01-01".to_string())).await;
        session.dispatch(Action::SetShortWindow(50)).await;
        session.dispatch(Action::SetLongWindow(200)).await;
    }

    #[tokio::test]
    async fn test_end_to_end_success() {
        let mut mock = MockTransport::new();
        mock.expect_post_json()
            .withf(|url, body| {
                url.ends_with("/api/analyze")
                    && *body
                        == serde_json::json!({
                            "ticker": "MSFT",
                            "startDate": "2023-01-01",
                            "endDate": "2024-01-01",
                            "shortWindow": 50,
                            "longWindow": 200,
                        })
            })
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(200, ANALYZE_BODY)));

        let mut session = session(mock);
        fill_msft(&mut session).await;
        session.submit().await;

        let state = session.state();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.error().is_none());

        let view = state.result().expect("results should render");
        assert_eq!(view.ticker, "MSFT");
        assert_eq!(view.summary.period_start, "2023-01-03");
        assert_eq!(view.summary.period_end, "2023-12-29");
        assert_eq!(view.summary.total_trades, Some(3));
        assert_eq!(view.summary.buy_signals, Some(2));
        assert_eq!(view.summary.sell_signals, Some(1));
        assert_eq!(view.summary.market_return, Some(56.8));
        assert_eq!(view.summary.strategy_return, Some(31.2));
        assert_eq!(view.summary.market_annual_return, Some(57.3));
        assert_eq!(view.summary.strategy_annual_return, Some(31.5));
        assert_eq!(view.summary.sharpe_ratio, Some(1.42));

        let rows = summary_rows(&view.summary);
        assert_eq!(rows[4].1, "56.8%");
        assert_eq!(rows[8].1, "1.42");

        assert_eq!(view.charts.len(), 2);
        assert_eq!(view.charts[0].title, PRICE_CHART_TITLE);
        assert_eq!(view.charts[1].title, RETURNS_CHART_TITLE);
        let strategy = view.charts[1].series_named("Strategy Return").unwrap();
        assert_eq!(strategy.y[2], None);
    }

    #[tokio::test]
    async fn test_end_to_end_failure() {
        let mut mock = MockTransport::new();
        mock.expect_post_json()
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(400, r#"{"error":"Invalid ticker"}"#)));

        let mut session = session(mock);
        fill_msft(&mut session).await;
        session.submit().await;

        let state = session.state();
        assert_eq!(state.error(), Some("Invalid ticker"));
        assert!(state.result().is_none());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_missing_ticker_never_calls_service() {
        let mut mock = MockTransport::new();
        mock.expect_post_json().times(0);

        let mut session = session(mock);
        session.submit().await;

        assert_eq!(session.state().error(), Some("Please enter a ticker symbol"));
        assert_eq!(session.state().phase(), Phase::Idle);
    }

    #[test]
    fn test_suggestion_failure_is_swallowed() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Ok(RawResponse::new(500, "Internal Server Error")));

        let mut session = session(mock);
        tokio_test::block_on(session.load_suggestions());

        assert!(session.state().suggestions.stocks().is_empty());
        assert!(session.state().error().is_none());
    }

    #[test]
    fn test_suggestion_network_failure_is_swallowed() {
        let mut mock = MockTransport::new();
        mock.expect_get().times(1).returning(|_| Err(network_error()));

        let mut session = session(mock);
        tokio_test::block_on(session.load_suggestions());

        assert!(session.state().suggestions.stocks().is_empty());
        assert!(session.state().error().is_none());
        assert_eq!(session.state().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_analyze_network_failure_clears_previous_result() {
        let mut mock = MockTransport::new();
        let mut calls = 0;
        mock.expect_post_json().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(RawResponse::new(200, ANALYZE_BODY))
            } else {
                Err(network_error())
            }
        });

        let mut session = session(mock);
        fill_msft(&mut session).await;
        session.submit().await;
        assert!(session.state().result().is_some());

        session.submit().await;

        let state = session.state();
        assert!(state.result().is_none());
        let message = state.error().expect("network failure should be shown");
        assert!(message.starts_with("Network error"), "{message}");
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_suggestions_loaded() {
        let mut mock = MockTransport::new();
        mock.expect_get().times(1).returning(|_| {
            Ok(RawResponse::new(
                200,
                r#"[{"symbol":"AAPL","name":"Apple Inc."},{"symbol":"MSFT","name":"Microsoft Corporation"}]"#,
            ))
        });

        let mut session = session(mock);
        tokio_test::block_on(async {
            session.load_suggestions().await;
            session.dispatch(Action::SetTicker("app".to_string())).await;
        });

        let SuggestionView::Matches(matches) = session.state().suggestion_view() else {
            panic!("Expected matches");
        };
        assert_eq!(matches[0].symbol, "AAPL");
    }
}
