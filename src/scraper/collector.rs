//! HTTP collector implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building an HTTP client with timeouts and a proper user agent
//! - GET requests paced by a single rate gate
//! - Bounded retry with incremental backoff for transient failures
//! - Error classification

use crate::config::ScraperConfig;
use crate::scraper::pacing::RateGate;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Terminal failure of a fetch after retries are exhausted
#[derive(Debug, Error)]
#[error("Fetch failed for {url}: {reason}")]
pub struct FetchFailure {
    /// The URL that could not be fetched
    pub url: String,
    /// The last error observed
    pub reason: String,
}

/// Builds the HTTP client used for all requests
///
/// # Arguments
///
/// * `config` - The scraper configuration holding the timeouts
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("inkshelf/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .build()
}

/// Issues rate-limited GET requests with bounded retry
///
/// The collector owns the pacing gate, so every request a run makes — first
/// attempts and retries alike — respects the same minimum interval.
pub struct Collector {
    client: Client,
    gate: RateGate,
    retry_count: u32,
    backoff: Duration,
}

impl Collector {
    /// Creates a collector from the scraper configuration
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            gate: RateGate::new(Duration::from_millis(config.rate_limit_ms)),
            retry_count: config.retry_count,
            backoff: Duration::from_millis(config.backoff_ms),
        })
    }

    /// Fetches a URL, returning the response body
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 2xx | Return body |
    /// | HTTP 429 / 5xx | Retry with incremental backoff |
    /// | Other HTTP status | Immediate failure |
    /// | Timeout | Retry with incremental backoff |
    /// | Connection error | Retry with incremental backoff |
    /// | Other client error | Immediate failure |
    ///
    /// The backoff before attempt `n` is `backoff * n`. After `retry_count`
    /// retries the last error is returned as a [`FetchFailure`].
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    pub async fn fetch(&mut self, url: &Url) -> Result<String, FetchFailure> {
        let mut last_reason = String::from("no attempts made");

        for attempt in 0..=self.retry_count {
            if attempt > 0 {
                let delay = self.backoff * attempt;
                tracing::debug!(
                    "Retry {}/{} for {} after {:?} ({})",
                    attempt,
                    self.retry_count,
                    url,
                    delay,
                    last_reason
                );
                tokio::time::sleep(delay).await;
            }

            self.gate.wait_turn().await;

            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => return Ok(body),
                            Err(e) => {
                                last_reason = format!("body read error: {}", e);
                                continue;
                            }
                        }
                    }

                    if is_retryable_status(status) {
                        last_reason = format!("HTTP {}", status.as_u16());
                        continue;
                    }

                    // 404 and friends never recover on retry
                    return Err(FetchFailure {
                        url: url.to_string(),
                        reason: format!("HTTP {}", status.as_u16()),
                    });
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_reason = "request timeout".to_string();
                    } else if e.is_connect() {
                        last_reason = "connection error".to_string();
                    } else {
                        return Err(FetchFailure {
                            url: url.to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        Err(FetchFailure {
            url: url.to_string(),
            reason: last_reason,
        })
    }
}

/// Whether an HTTP status is worth retrying
fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}
