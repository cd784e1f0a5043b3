//! One bounded HTTP GET per configured site.
//!
//! The fetcher sends a browser-like `User-Agent` and `Accept-Language` so
//! trivial bot filters let the request through, enforces a fixed timeout and
//! classifies every failure into a [`FetchError`]. There are no retries: one
//! failed attempt is final for that site within a request.

use reqwest::header::{ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument};

/// Default per-site timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Why a page could not be retrieved.
///
/// The `Display` text is what ends up in a failure record's description.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// DNS, refused connection, TLS handshake and similar transport failures.
    #[error("Connection error: {0}")]
    Connect(String),
    /// The server answered with a non-2xx status.
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Any other failure while sending the request or reading the body.
    #[error("Request failed: {0}")]
    Request(String),
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Response body, decoded using the charset from `Content-Type` (UTF-8
    /// when none is declared).
    pub body: String,
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
}

/// Either the fetched page or a typed network failure.
pub type FetchResult = Result<FetchedPage, FetchError>;

/// HTTP client configured for scraping pages.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Fetch a single page.
    ///
    /// The URL is not validated beyond what `reqwest` does; malformed URLs
    /// come back as [`FetchError::Request`].
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );

        Ok(FetchedPage {
            body,
            final_url,
            status: status.as_u16(),
        })
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
