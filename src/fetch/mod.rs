//! Page fetching with bounded retry.
//!
//! A [`Fetcher`] performs one GET per [`Transport`] call and retries
//! connection failures and the statuses listed in its [`RetryPolicy`]
//! (500, 502, 503, 504 by default), sleeping with exponential backoff
//! in between. Any other non-2xx status fails straight away.
//!
//! ```no_run
//! use page_scraper::fetch::{FetchConfig, Fetcher};
//!
//! let fetcher = Fetcher::new(&FetchConfig::default(), None)?;
//! let page = fetcher.fetch("https://example.com/")?;
//! println!("{} bytes after {} attempt(s)", page.body.len(), page.attempts);
//! # Ok::<(), page_scraper::FetchError>(())
//! ```

mod retry;
mod transport;

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::encoding;
use crate::error::FetchError;

pub use retry::{RetryDecision, RetryPolicy, RETRY_STATUSES};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

/// Long-lived fetch configuration, shared by every scrape in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Retry budget and backoff.
    pub retry: RetryPolicy,

    /// Per-request timeout covering connect and body read.
    ///
    /// Default: 30 seconds
    pub timeout: Option<Duration>,

    /// `User-Agent` header value.
    ///
    /// Default: `page-scraper/<crate version>`
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("page-scraper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// URL that was requested.
    pub url: String,
    /// URL after redirects.
    pub final_url: String,
    /// Final (2xx) status.
    pub status: u16,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Attempts made, including the successful one.
    pub attempts: u32,
}

impl RawPage {
    /// Build a page from an in-memory HTML string, as if fetched once.
    #[must_use]
    pub fn from_html(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            final_url: url.to_string(),
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: html.as_bytes().to_vec(),
            attempts: 1,
        }
    }

    /// Body decoded to UTF-8 using the declared charset.
    #[must_use]
    pub fn text(&self) -> String {
        encoding::decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Fetches one URL with retry. Generic over the transport so the retry
/// policy can be driven without a network.
#[derive(Debug, Clone)]
pub struct Fetcher<T = HttpTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl Fetcher<HttpTransport> {
    /// Fetcher over a fresh HTTP client, optionally routed via `proxy`.
    pub fn new(config: &FetchConfig, proxy: Option<&str>) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(proxy, config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(transport, config.retry.clone()))
    }
}

impl<T: Transport> Fetcher<T> {
    /// Fetcher over any transport.
    pub fn with_transport(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// The retry policy in effect.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET `url`, retrying transient failures.
    ///
    /// Returns the page on the first 2xx response. Fails with
    /// [`FetchError::HttpStatus`] on a non-retryable status or when retryable
    /// statuses use up the budget, and with [`FetchError::Network`] when the
    /// last attempt could not get a response at all.
    pub fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
        let url = validate_url(url)?;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(url = %url, attempt, "sending request");

            let failure = match self.transport.get(&url) {
                Ok(response) if response.is_success() => {
                    debug!(url = %url, status = response.status, attempt, "fetched page");
                    return Ok(RawPage {
                        url,
                        final_url: response.final_url,
                        status: response.status,
                        content_type: response.content_type,
                        body: response.body,
                        attempts: attempt,
                    });
                }
                Ok(response) => {
                    let retryable = self.policy.is_retryable_status(response.status);
                    let error = FetchError::HttpStatus {
                        status: response.status,
                        reason: response.reason,
                        attempts: attempt,
                    };
                    (error, retryable)
                }
                Err(TransportError(message)) => (
                    FetchError::Network {
                        message,
                        attempts: attempt,
                    },
                    true,
                ),
            };

            let (error, retryable) = failure;
            match self.policy.decide(attempt, retryable) {
                RetryDecision::Retry(delay) => {
                    warn!(
                        url = %url,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "transient fetch failure, retrying"
                    );
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                }
                RetryDecision::GiveUp | RetryDecision::NotRetryable => return Err(error),
            }
        }
    }
}

/// GET `url` with the default configuration, optionally through `proxy`.
pub fn fetch(url: &str, proxy: Option<&str>) -> Result<RawPage, FetchError> {
    Fetcher::new(&FetchConfig::default(), proxy)?.fetch(url)
}

/// Check that `url` is a non-empty absolute http(s) URL.
fn validate_url(url: &str) -> Result<String, FetchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|e| FetchError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}
