//! The single-request seam under the fetcher.
//!
//! A [`Transport`] sends exactly one GET and reports what came back; retry
//! and status policy live in the fetcher. [`HttpTransport`] is the real
//! implementation on top of a blocking `reqwest` client.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Proxy;

use crate::error::FetchError;

/// One HTTP response, fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Status code.
    pub status: u16,
    /// Canonical reason phrase for the status, if known.
    pub reason: String,
    /// URL after redirects.
    pub final_url: String,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any response (connect, DNS, TLS, timeout, body read).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends a single GET request.
pub trait Transport {
    /// Perform one request against `url`.
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        (**self).get(url)
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client. With a proxy, both http and https go through it;
    /// without one, environment proxy variables are ignored.
    pub fn new(
        proxy: Option<&str>,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(user_agent).timeout(timeout);

        builder = match proxy {
            Some(proxy_url) => {
                url::Url::parse(proxy_url).map_err(|e| FetchError::InvalidProxy {
                    proxy: proxy_url.to_string(),
                    reason: e.to_string(),
                })?;
                let proxy = Proxy::all(proxy_url).map_err(|e| FetchError::InvalidProxy {
                    proxy: proxy_url.to_string(),
                    reason: error_chain(&e),
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(error_chain(&e)))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError(error_chain(&e)))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .map_err(|e| TransportError(error_chain(&e)))?
            .to_vec();

        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            final_url,
            content_type,
            body,
        })
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
