//! Per-invocation scrape settings.
//!
//! `ScrapeSettings` selects which extraction passes run and whether the fetch
//! goes through a proxy. Every toggle is independent of the others.

use crate::error::{Error, Result};

/// Settings for one scrape.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use page_scraper::ScrapeSettings;
///
/// let settings = ScrapeSettings {
///     scrape_headlines: true,
///     headline_tags: vec!["h2".to_string(), "h1".to_string()],
///     scrape_links: true,
///     ..ScrapeSettings::default()
/// };
/// assert!(settings.scrape_tables);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScrapeSettings {
    /// Convert every `<table>` into a `Table`.
    ///
    /// Default: `true`
    pub scrape_tables: bool,

    /// Collect text of elements named in `headline_tags`.
    ///
    /// Default: `false`
    pub scrape_headlines: bool,

    /// Tag names to collect when `scrape_headlines` is on.
    ///
    /// Iterated in the order given; results are grouped per tag, not
    /// interleaved by document position. Duplicates are ignored.
    ///
    /// Default: empty
    pub headline_tags: Vec<String>,

    /// Collect absolute (`http...`) link targets.
    ///
    /// Default: `false`
    pub scrape_links: bool,

    /// Collect `<img src>` values verbatim.
    ///
    /// Default: `false`
    pub scrape_images: bool,

    /// Collect trimmed text of every element with this tag name.
    ///
    /// An empty or whitespace-only value counts as unset.
    ///
    /// Default: `None`
    pub custom_tag: Option<String>,

    /// Route the fetch through `proxy_url` for both http and https.
    ///
    /// Default: `false`
    pub use_proxy: bool,

    /// Proxy to use when `use_proxy` is on.
    ///
    /// Default: `None`
    pub proxy_url: Option<String>,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            scrape_tables: true,
            scrape_headlines: false,
            headline_tags: Vec::new(),
            scrape_links: false,
            scrape_images: false,
            custom_tag: None,
            use_proxy: false,
            proxy_url: None,
        }
    }
}

impl ScrapeSettings {
    /// Settings with every extraction pass switched off.
    #[must_use]
    pub fn none() -> Self {
        Self {
            scrape_tables: false,
            ..Self::default()
        }
    }

    /// The proxy the fetch should use, if any.
    ///
    /// Returns `Ok(None)` when `use_proxy` is off (a stray `proxy_url` is
    /// ignored), and an error when it is on without a usable URL.
    pub fn proxy(&self) -> Result<Option<&str>> {
        if !self.use_proxy {
            return Ok(None);
        }
        match self.proxy_url.as_deref().map(str::trim) {
            Some(proxy) if !proxy.is_empty() => Ok(Some(proxy)),
            _ => Err(Error::InvalidSettings(
                "proxy is enabled but no proxy URL was given".to_string(),
            )),
        }
    }

    /// Headline tags trimmed, lowercased and de-duplicated, caller order kept.
    #[must_use]
    pub fn normalized_headline_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(self.headline_tags.len());
        for tag in &self.headline_tags {
            let tag = tag.trim().to_ascii_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    /// The custom tag, or `None` if unset or blank.
    #[must_use]
    pub fn custom_tag(&self) -> Option<&str> {
        self.custom_tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}
