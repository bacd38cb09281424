//! Progress reporting for a running scrape.
//!
//! The pipeline reports fixed milestones (percent complete plus a short
//! status line). Front ends render them however they like.

use tracing::info;

/// Receives pipeline milestones.
pub trait Progress {
    /// Called with a percentage in `0..=100` and a status line.
    fn report(&mut self, percent: u8, message: &str);
}

/// Discards every report.
impl Progress for () {
    fn report(&mut self, _percent: u8, _message: &str) {}
}

/// Forwards reports to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn report(&mut self, percent: u8, message: &str) {
        info!(percent, "{message}");
    }
}

/// Keeps every report, in order.
impl Progress for Vec<(u8, String)> {
    fn report(&mut self, percent: u8, message: &str) {
        self.push((percent, message.to_string()));
    }
}

/// Milestones, as `(percent, message)`.
pub(crate) mod milestone {
    pub const STARTED: (u8, &str) = (10, "Initializing scraper...");
    pub const PARSING: (u8, &str) = (30, "Parsing content...");
    pub const TABLES: (u8, &str) = (50, "Scraping tables...");
    pub const HEADLINES: (u8, &str) = (60, "Scraping headlines...");
    pub const LINKS: (u8, &str) = (70, "Scraping links...");
    pub const IMAGES: (u8, &str) = (80, "Scraping images...");
    pub const CUSTOM_TAGS: (u8, &str) = (90, "Scraping custom tags...");
    pub const COMPLETED: (u8, &str) = (100, "Scraping completed!");
}

/// Report a milestone.
pub(crate) fn emit(progress: &mut dyn Progress, (percent, message): (u8, &str)) {
    progress.report(percent, message);
}
