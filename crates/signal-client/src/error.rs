//! Error types for the analysis client

use thiserror::Error;

/// Message shown when the ticker field is blank
pub const MISSING_TICKER_MESSAGE: &str = "Please enter a ticker symbol";

/// Message used when the analysis endpoint fails without an `error` field
pub const ANALYSIS_FALLBACK_MESSAGE: &str = "Failed to analyze stock data";

/// Errors produced by the parameter controller and the request adapter
#[derive(Debug, Error)]
pub enum SignalError {
    /// Ticker was empty or whitespace-only
    #[error("{}", MISSING_TICKER_MESSAGE)]
    MissingTicker,

    /// Transport-level failure talking to either endpoint
    #[error("Network error: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// Non-2xx from the analysis endpoint
    #[error("{message}")]
    AnalysisError {
        status: u16,
        message: String,
    },

    /// Body was still not valid JSON after sanitization
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SignalError {
    /// Build an [`SignalError::AnalysisError`], falling back to the generic
    /// message when the server did not provide one
    pub fn analysis(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| ANALYSIS_FALLBACK_MESSAGE.to_string());
        Self::AnalysisError { status, message }
    }
}

impl From<serde_json::Error> for SignalError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for SignalError {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigError(format!("Invalid URL: {err}"))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SignalError::MissingTicker.to_string(),
            "Please enter a ticker symbol"
        );

        let err = SignalError::analysis(400, Some("Invalid ticker".to_string()));
        assert_eq!(err.to_string(), "Invalid ticker");
    }

    #[test]
    fn test_analysis_fallback_message() {
        let err = SignalError::analysis(500, None);
        assert_eq!(err.to_string(), ANALYSIS_FALLBACK_MESSAGE);

        let err = SignalError::analysis(502, Some(String::new()));
        match err {
            SignalError::AnalysisError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, ANALYSIS_FALLBACK_MESSAGE);
            }
            other => panic!("Expected AnalysisError, got {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: SignalError = json_err.into();
        assert!(matches!(err, SignalError::MalformedResponse(_)));
    }
}
