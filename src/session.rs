//! Application session: runs the fetch → extract → export pipeline and owns
//! the state that outlives a single scrape.
//!
//! The session counts completed scrapes and keeps the most recent result.
//! Both are written only after a scrape succeeds; a failed scrape leaves the
//! previous state untouched.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::export::{self, Artifact, ExportFormat};
use crate::extract;
use crate::fetch::{FetchConfig, Fetcher, Transport};
use crate::progress::{emit, milestone, Progress};
use crate::result::ScrapeResult;
use crate::settings::ScrapeSettings;

/// Long-lived scraper state.
#[derive(Debug, Clone, Default)]
pub struct ScrapeSession {
    fetch_config: FetchConfig,
    scrape_count: u64,
    last_result: Option<ScrapeResult>,
}

impl ScrapeSession {
    /// A session using `fetch_config` for every scrape.
    #[must_use]
    pub fn new(fetch_config: FetchConfig) -> Self {
        Self {
            fetch_config,
            ..Self::default()
        }
    }

    /// Fetch configuration in effect.
    #[must_use]
    pub fn fetch_config(&self) -> &FetchConfig {
        &self.fetch_config
    }

    /// Number of scrapes that completed successfully.
    #[must_use]
    pub fn scrape_count(&self) -> u64 {
        self.scrape_count
    }

    /// Result of the most recent successful scrape.
    #[must_use]
    pub fn last_result(&self) -> Option<&ScrapeResult> {
        self.last_result.as_ref()
    }

    /// Forget the count and the last result.
    pub fn reset(&mut self) {
        self.scrape_count = 0;
        self.last_result = None;
        info!("session data cleared");
    }

    /// Scrape `url` over HTTP with a fetcher built for this invocation.
    pub fn scrape(
        &mut self,
        url: &str,
        settings: &ScrapeSettings,
        progress: &mut dyn Progress,
    ) -> Result<&ScrapeResult> {
        emit(progress, milestone::STARTED);
        let proxy = settings.proxy()?;
        let fetcher = Fetcher::new(&self.fetch_config, proxy)?;
        self.run(&fetcher, url, settings, progress)
    }

    /// Scrape `url` through a caller-supplied fetcher.
    pub fn scrape_with<T: Transport>(
        &mut self,
        fetcher: &Fetcher<T>,
        url: &str,
        settings: &ScrapeSettings,
        progress: &mut dyn Progress,
    ) -> Result<&ScrapeResult> {
        emit(progress, milestone::STARTED);
        settings.proxy()?;
        self.run(fetcher, url, settings, progress)
    }

    fn run<T: Transport>(
        &mut self,
        fetcher: &Fetcher<T>,
        url: &str,
        settings: &ScrapeSettings,
        progress: &mut dyn Progress,
    ) -> Result<&ScrapeResult> {
        let page = fetcher.fetch(url).map_err(|err| {
            warn!(url, error = %err, "fetch failed");
            Error::from(err)
        })?;

        let result = extract::extract_with_progress(&page.text(), settings, progress);
        self.scrape_count += 1;
        info!(
            url,
            attempts = page.attempts,
            scrape_count = self.scrape_count,
            "scrape completed"
        );
        Ok(self.last_result.insert(result))
    }

    /// Export the last result.
    pub fn export_last(&self, format: ExportFormat) -> Result<Artifact> {
        let result = self.last_result.as_ref().ok_or(Error::NoResult)?;
        Ok(export::export(result, format)?)
    }
}
