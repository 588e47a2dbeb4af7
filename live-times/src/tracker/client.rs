//! Bus tracker HTTP client.
//!
//! Fetches live times over HTTP and hands the body to the parsers. No retry
//! or caching happens here; callers decide what to do with a retryable
//! [`LiveTimesError`].

use chrono::Utc;
use reqwest::StatusCode;
use tracing::debug;

use crate::domain::{Journey, LiveBusTimes, StopCode};

use super::bus_times::parse_bus_times_str;
use super::error::LiveTimesError;
use super::journey_times::parse_journey_times_str;

/// Default base URL for the tracker API.
const DEFAULT_BASE_URL: &str = "https://www.mybustracker.co.uk/ws.php";

/// Default number of departures requested per service.
const DEFAULT_DEPARTURES: u8 = 4;

/// Errors from fetching live times.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an unexpected status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response was received but reported or contained an error
    #[error(transparent)]
    LiveTimes(#[from] LiveTimesError),
}

/// Configuration for the tracker client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL for the API (defaults to the production tracker)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Departures requested per service
    pub departures: u8,
}

impl ClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            departures: DEFAULT_DEPARTURES,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of departures requested per service.
    pub fn with_departures(mut self, n: u8) -> Self {
        self.departures = n;
        self
    }
}

/// Bus tracker API client.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl TrackerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Get live times for one or more stops.
    pub async fn get_bus_times(&self, stops: &[StopCode]) -> Result<LiveBusTimes, FetchError> {
        let stop_ids = stops
            .iter()
            .map(StopCode::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let query = [
            ("function", "getBusTimes".to_string()),
            ("key", self.config.api_key.clone()),
            ("stopId", stop_ids),
            ("nb", self.config.departures.to_string()),
        ];

        let body = self.fetch(&query).await?;
        Ok(parse_bus_times_str(&body, Utc::now())?)
    }

    /// Get the remaining stops of a journey, as seen from `stop`.
    pub async fn get_journey_times(
        &self,
        stop: &StopCode,
        journey_id: &str,
    ) -> Result<Journey, FetchError> {
        let query = [
            ("function", "getJourneyTimes".to_string()),
            ("key", self.config.api_key.clone()),
            ("stopId", stop.as_str().to_string()),
            ("journeyId", journey_id.to_string()),
        ];

        let body = self.fetch(&query).await?;
        Ok(parse_journey_times_str(&body, Utc::now())?)
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<String, FetchError> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "tracker responded");

        if let Some(err) = status_error(status) {
            return Err(err.into());
        }

        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(status = status.as_u16(), error = %e, "could not read error body");
                    String::new()
                }
            };
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

/// Map HTTP statuses that mean the same as a fault envelope.
fn status_error(status: StatusCode) -> Option<LiveTimesError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(LiveTimesError::Authentication),
        StatusCode::SERVICE_UNAVAILABLE => Some(LiveTimesError::Maintenance),
        StatusCode::TOO_MANY_REQUESTS => Some(LiveTimesError::SystemOverloaded),
        _ => None,
    }
}
