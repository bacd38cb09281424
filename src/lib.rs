//! # page-scraper
//!
//! Fetch one web page, pull out the content categories you ask for, and
//! export them as JSON or an XLSX workbook.
//!
//! ## Quick Start
//!
//! ```rust
//! use page_scraper::{extract_html, export_at, ExportFormat, ScrapeSettings};
//!
//! let html = r#"<html><body>
//!     <h2>Breaking News</h2><h2>Weather</h2>
//!     <table><tr><th>City</th><th>Temp</th></tr><tr><td>Oslo</td><td>4</td></tr></table>
//! </body></html>"#;
//!
//! let settings = ScrapeSettings {
//!     scrape_headlines: true,
//!     headline_tags: vec!["h2".to_string()],
//!     ..ScrapeSettings::default()
//! };
//! let result = extract_html(html, &settings);
//! assert_eq!(result.headlines, vec!["Breaking News", "Weather"]);
//! assert_eq!(result.tables[0].get(0, "City"), Some("Oslo"));
//!
//! let captured = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
//!     .and_then(|d| d.and_hms_opt(3, 4, 5))
//!     .unwrap();
//! let artifact = export_at(&result, ExportFormat::Json, captured)?;
//! assert_eq!(artifact.file_name, "scraped_data_20250102_030405.json");
//! # Ok::<(), page_scraper::ExportError>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Fetch**: one GET, optionally through a proxy, retried up to 3 attempts
//!   on connection failures and 500/502/503/504 with exponential backoff
//! - **Extract**: independent, order-preserving passes over one parsed document
//! - **Export**: JSON or XLSX artifact named `scraped_data_<YYYYMMDD_HHMMSS>.<ext>`
//!
//! [`ScrapeSession`] chains the three and keeps the scrape count and last result.

mod error;
mod patterns;
mod progress;
mod result;
mod settings;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Page fetching with bounded retry.
pub mod fetch;

/// Extraction passes (tables, headlines, links, images, custom tag).
pub mod extract;

/// JSON and XLSX export.
pub mod export;

/// Plain-text rendering of results.
pub mod render;

/// Session state and pipeline orchestration.
pub mod session;

// Public API - re-exports
pub use error::{Error, ExportError, FetchError, Result, Stage};
pub use export::{export, export_at, Artifact, ExportFormat};
pub use extract::{extract, extract_html, extract_with_progress};
pub use fetch::{fetch, FetchConfig, Fetcher, RawPage, RetryPolicy};
pub use progress::{LogProgress, Progress};
pub use result::{ScrapeResult, Table};
pub use session::ScrapeSession;
pub use settings::ScrapeSettings;
