//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawl, including:
//! - Building the HTTP client
//! - Rotating User-Agent headers per request
//! - Bounding in-flight requests through a shared semaphore
//! - Exponential-backoff retry on rate limiting (HTTP 429)
//! - Error classification

use crate::config::{CrawlConfig, IdentityConfig};
use rand::seq::SliceRandom;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// HTTP 429 persisted through the whole retry budget
    RateLimited {
        /// Total requests issued for this URL
        attempts: u32,
    },

    /// Non-200, non-429 HTTP status (not retried)
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Consumes the outcome, returning the body on success
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body } => Some(body),
            _ => None,
        }
    }
}

/// Builds the HTTP client shared by all fetches of a run
///
/// The User-Agent is intentionally left off the client: it is rotated per
/// request from the configured pool instead.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Owned session handle for issuing HTTP GETs during one crawl run
///
/// All fetches of a run, listing and detail alike, go through one `Fetcher`
/// so they share the same client and the same concurrency gate. The handle
/// is cheap to clone (the client and gate are reference counted), which lets
/// detail fetches run as spawned tasks.
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 200 | Return body |
/// | HTTP 429 | Retry up to `retry_limit` times, delay base * 2^attempt |
/// | Other status | Immediate failure, no retry |
/// | Transport error | Immediate failure, no retry |
///
/// With the default base of 1 s and limit of 5, the delays are 2, 4, 8, 16
/// and 32 seconds; a sixth consecutive 429 yields `RateLimited`.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    gate: Arc<Semaphore>,
    user_agents: Arc<Vec<String>>,
    retry_limit: u32,
    backoff_base: Duration,
}

impl Fetcher {
    /// Creates a fetcher from the crawl and identity configuration
    pub fn new(crawl: &CrawlConfig, identity: &IdentityConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client()?;
        let gate = Arc::new(Semaphore::new(crawl.max_concurrent_fetches as usize));

        Ok(Self {
            client,
            gate,
            user_agents: Arc::new(identity.user_agents.clone()),
            retry_limit: crawl.retry_limit,
            backoff_base: Duration::from_millis(crawl.backoff_base_ms),
        })
    }

    /// Fetches a URL, retrying on rate limiting
    ///
    /// The semaphore permit is held for the whole call, backoff sleeps
    /// included, so retries count against the in-flight bound.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        // Closed semaphore is unreachable: the gate lives as long as self
        let _permit = match self.gate.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return FetchOutcome::NetworkError {
                    error: "Concurrency gate closed".to_string(),
                }
            }
        };

        let mut attempt: u32 = 1;
        loop {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::USER_AGENT, self.pick_user_agent())
                .send()
                .await;

            match response {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        if attempt <= self.retry_limit {
                            let delay = self.backoff_base * 2u32.pow(attempt);
                            tracing::warn!(
                                "Rate limit hit for {}, retrying after {:?} (attempt {}/{})",
                                url,
                                delay,
                                attempt,
                                self.retry_limit
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            continue;
                        }
                        tracing::error!(
                            "Giving up on {} after {} rate-limited attempts",
                            url,
                            attempt
                        );
                        return FetchOutcome::RateLimited { attempts: attempt };
                    }

                    if !status.is_success() {
                        tracing::warn!("Failed to fetch {} with status {}", url, status);
                        return FetchOutcome::HttpError {
                            status_code: status.as_u16(),
                        };
                    }

                    return match response.text().await {
                        Ok(body) => FetchOutcome::Success { body },
                        Err(e) => FetchOutcome::NetworkError {
                            error: e.to_string(),
                        },
                    };
                }
                Err(e) => {
                    // Classify error
                    let error = if e.is_timeout() {
                        "Request timeout".to_string()
                    } else if e.is_connect() {
                        "Connection refused".to_string()
                    } else {
                        e.to_string()
                    };
                    tracing::warn!("Error fetching {}: {}", url, error);
                    return FetchOutcome::NetworkError { error };
                }
            }
        }
    }

    fn pick_user_agent(&self) -> String {
        let mut rng = rand::thread_rng();
        self.user_agents
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default()
    }
}
