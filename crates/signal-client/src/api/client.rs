//! Analysis service client

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::transport::{RawResponse, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{Result, SignalError};
use crate::models::{AnalysisRequest, AnalysisResponse, StockSuggestion};
use crate::sanitize;

/// Shape of an error body from the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the `/api/stocks` and `/api/analyze` endpoints
///
/// No retries are attempted; every failure is returned to the caller.
#[derive(Clone)]
pub struct AnalysisClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AnalysisClient {
    /// Create a client using the `reqwest` transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the autocomplete reference list
    #[instrument(skip(self))]
    pub async fn fetch_stocks(&self) -> Result<Vec<StockSuggestion>> {
        let url = self.config.stocks_url()?;
        let response = self.transport.get(url.as_str()).await?;

        if !response.is_success() {
            return Err(error_from(&response));
        }

        let stocks: Vec<StockSuggestion> = sanitize::parse(&response.body)?;
        debug!(count = stocks.len(), "Loaded stock suggestions");
        Ok(stocks)
    }

    /// Submit an analysis request
    #[instrument(skip(self, request), fields(ticker = %request.ticker))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let url = self.config.analyze_url()?;
        let body = serde_json::to_value(request)
            .map_err(|e| SignalError::MalformedResponse(format!("Failed to encode request: {e}")))?;

        debug!(
            start = %request.start_date,
            end = %request.end_date,
            short_window = request.short_window,
            long_window = request.long_window,
            "Sending analysis request"
        );
        let response = self.transport.post_json(url.as_str(), body).await?;

        if !response.is_success() {
            let err = error_from(&response);
            warn!(status = response.status, error = %err, "Analysis request failed");
            return Err(err);
        }

        sanitize::parse(&response.body)
    }
}

/// Map a non-2xx response onto [`SignalError::AnalysisError`]
fn error_from(response: &RawResponse) -> SignalError {
    let message = sanitize::parse::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.error);
    SignalError::analysis(response.status, message)
}
