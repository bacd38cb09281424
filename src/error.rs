//! Error types for page-scraper.
//!
//! Each pipeline stage has its own error enum. The top-level [`Error`] wraps
//! them and always renders as `"<stage> failed: <reason>"`, which is the one
//! message a user-facing surface should show.

use std::fmt;

/// Pipeline stage that produced a terminal failure.
///
/// Extraction has no entry: per-element problems become
/// [`ScrapeResult::warnings`](crate::ScrapeResult::warnings) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Settings were rejected before any network I/O.
    Settings,
    /// Fetching the target page.
    Fetch,
    /// Building the exported artifact.
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Settings => "settings",
            Self::Fetch => "fetch",
            Self::Export => "export",
        };
        f.write_str(name)
    }
}

/// Failure while fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The target URL was empty or whitespace.
    #[error("URL must not be empty")]
    EmptyUrl,

    /// The target URL could not be parsed or is not http(s).
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The proxy URL could not be used.
    #[error("invalid proxy {proxy:?}: {reason}")]
    InvalidProxy { proxy: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// Connection, DNS, timeout or body read failure after all attempts.
    #[error("network error after {attempts} attempt(s): {message}")]
    Network { message: String, attempts: u32 },

    /// Non-success HTTP status. For retryable statuses this is the last one
    /// seen once the retry budget ran out.
    #[error("HTTP {status} {reason} after {attempts} attempt(s)")]
    HttpStatus {
        status: u16,
        reason: String,
        attempts: u32,
    },
}

impl FetchError {
    /// Number of attempts made before giving up, if any request was sent.
    #[must_use]
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Network { attempts, .. } | Self::HttpStatus { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure while building or writing an artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet generation failed.
    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Data does not fit the spreadsheet format.
    #[error("spreadsheet limit exceeded: {0}")]
    Limit(String),

    /// Writing the artifact to disk failed.
    #[error("writing artifact failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Settings are inconsistent (e.g. proxy enabled without a proxy URL).
    #[error("settings failed: {0}")]
    InvalidSettings(String),

    /// The page could not be fetched. No extraction was attempted.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The artifact could not be produced. Any held result is unaffected.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    /// An export was requested but no scrape has completed yet.
    #[error("export failed: no scrape result available")]
    NoResult,
}

impl Error {
    /// The stage this failure belongs to.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::InvalidSettings(_) => Stage::Settings,
            Self::Fetch(_) => Stage::Fetch,
            Self::Export(_) | Self::NoResult => Stage::Export,
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
