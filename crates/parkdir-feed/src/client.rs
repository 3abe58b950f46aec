//! HTTP client for the listing and override feeds.

use std::time::Duration;

use serde_json::Value;

use crate::error::FeedError;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Thin wrapper over a configured [`reqwest::Client`].
///
/// Feed locations are plain URLs, so tests point the same client at a
/// wiremock server simply by listing mock URLs as sources.
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Creates a client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("parkdir/0.1 (listing-directory)")
            .build()?;
        Ok(Self { http })
    }

    /// Fetches a URL and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network failure.
    /// - [`FeedError::HttpStatus`] on a non-2xx response.
    /// - [`FeedError::Deserialize`] if the body is not valid JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FeedError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_owned(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| FeedError::Deserialize {
            context: url.to_owned(),
            source,
        })
    }
}
