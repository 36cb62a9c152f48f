//! Configuration for the analysis client

use crate::error::{Result, SignalError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Base URL of the analysis service when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Environment variable overriding [`DEFAULT_API_BASE`]
pub const API_BASE_ENV: &str = "SIGNAL_API_BASE";

/// Environment variable setting a request timeout in seconds
pub const TIMEOUT_ENV: &str = "SIGNAL_TIMEOUT_SECS";

const STOCKS_PATH: &str = "api/stocks";
const ANALYZE_PATH: &str = "api/analyze";

/// Configuration for the analysis client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the analysis service; endpoint paths are resolved against it
    pub api_base: Url,

    /// Request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: parse_base(DEFAULT_API_BASE).expect("default base URL is valid"),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load `SIGNAL_API_BASE` and `SIGNAL_TIMEOUT_SECS` from the environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.api_base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SignalError::ConfigError(format!(
                    "api_base must use http or https, got {other}"
                )));
            }
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(SignalError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// URL of the suggestion list endpoint
    pub fn stocks_url(&self) -> Result<Url> {
        Ok(self.api_base.join(STOCKS_PATH)?)
    }

    /// URL of the analysis endpoint
    pub fn analyze_url(&self) -> Result<Url> {
        Ok(self.api_base.join(ANALYZE_PATH)?)
    }
}

/// Parse a base URL, making sure it ends with `/` so that joins append
/// rather than replace the last path segment
fn parse_base(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{trimmed}/"))?)
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    env_error: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the service base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Fill unset fields from the environment
    pub fn with_env(mut self) -> Self {
        if self.api_base.is_none() {
            if let Ok(base) = std::env::var(API_BASE_ENV) {
                self.api_base = Some(base);
            }
        }

        if self.request_timeout.is_none() {
            if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
                match raw.trim().parse::<u64>() {
                    Ok(secs) => self.request_timeout = Some(Duration::from_secs(secs)),
                    Err(e) => self.env_error = Some(format!("{TIMEOUT_ENV}={raw}: {e}")),
                }
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        if let Some(err) = self.env_error {
            return Err(SignalError::ConfigError(err));
        }

        let defaults = ClientConfig::default();
        let api_base = match self.api_base {
            Some(raw) => parse_base(&raw)?,
            None => defaults.api_base,
        };

        let config = ClientConfig {
            api_base,
            request_timeout: self.request_timeout.or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
