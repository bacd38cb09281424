//! Content extraction passes.
//!
//! The page is parsed once; each enabled pass then walks the same document
//! independently and appends to its own field of the [`ScrapeResult`]. Every
//! pass preserves document order and depends on nothing but the HTML and the
//! settings.

pub mod tables;

use tracing::{debug, warn};

use crate::dom::{self, Document};
use crate::fetch::RawPage;
use crate::patterns::ABSOLUTE_HREF;
use crate::progress::{emit, milestone, Progress};
use crate::result::{ScrapeResult, Table};
use crate::settings::ScrapeSettings;

/// Extract everything `settings` asks for from a fetched page.
#[must_use]
pub fn extract(page: &RawPage, settings: &ScrapeSettings) -> ScrapeResult {
    extract_html(&page.text(), settings)
}

/// Extract from an HTML string.
#[must_use]
pub fn extract_html(html: &str, settings: &ScrapeSettings) -> ScrapeResult {
    extract_with_progress(html, settings, &mut ())
}

/// Extract from an HTML string, reporting a milestone before each pass.
pub fn extract_with_progress(
    html: &str,
    settings: &ScrapeSettings,
    progress: &mut dyn Progress,
) -> ScrapeResult {
    emit(progress, milestone::PARSING);
    let document = Document::from(html);
    let mut result = ScrapeResult::default();

    if settings.scrape_tables {
        emit(progress, milestone::TABLES);
        let (tables, warnings) = extract_tables(&document);
        result.tables = tables;
        result.warnings.extend(warnings);
    }

    if settings.scrape_headlines {
        emit(progress, milestone::HEADLINES);
        let tags = settings.normalized_headline_tags();
        let (headlines, warnings) = extract_headlines(&document, &tags);
        result.headlines = headlines;
        result.warnings.extend(warnings);
    }

    if settings.scrape_links {
        emit(progress, milestone::LINKS);
        result.links = extract_links(&document);
    }

    if settings.scrape_images {
        emit(progress, milestone::IMAGES);
        result.images = extract_images(&document);
    }

    if let Some(tag) = settings.custom_tag() {
        emit(progress, milestone::CUSTOM_TAGS);
        match tag_texts(&document, &tag.to_ascii_lowercase()) {
            Some(texts) => result.custom_tags = texts,
            None => result.warnings.push(invalid_tag_warning(tag)),
        }
    }

    debug!(
        tables = result.tables.len(),
        headlines = result.headlines.len(),
        links = result.links.len(),
        images = result.images.len(),
        custom_tags = result.custom_tags.len(),
        warnings = result.warnings.len(),
        "extraction complete"
    );
    emit(progress, milestone::COMPLETED);
    result
}

/// Every `<table>` in document order. Tables that cannot be converted are
/// skipped and reported as warnings (`table <n>: ...`, 1-based).
pub fn extract_tables(document: &Document) -> (Vec<Table>, Vec<String>) {
    let mut tables = Vec::new();
    let mut warnings = Vec::new();

    for (index, table) in document.select("table").iter().enumerate() {
        match tables::parse_table(&table) {
            Ok(parsed) => tables.push(parsed),
            Err(err) => {
                let message = format!("table {}: {err}; skipped", index + 1);
                warn!("{message}");
                warnings.push(message);
            }
        }
    }

    (tables, warnings)
}

/// Trimmed text of each requested tag, grouped by tag in the order given.
pub fn extract_headlines(document: &Document, tags: &[String]) -> (Vec<String>, Vec<String>) {
    let mut headlines = Vec::new();
    let mut warnings = Vec::new();

    for tag in tags {
        match tag_texts(document, tag) {
            Some(texts) => headlines.extend(texts),
            None => warnings.push(invalid_tag_warning(tag)),
        }
    }

    (headlines, warnings)
}

/// `href` of every `<a>` whose target starts with `http`, verbatim.
pub fn extract_links(document: &Document) -> Vec<String> {
    document
        .select("a[href]")
        .iter()
        .filter_map(|a| dom::non_empty_attr(&a, "href"))
        .filter(|href| ABSOLUTE_HREF.is_match(href))
        .collect()
}

/// Non-empty `src` of every `<img>`, verbatim.
pub fn extract_images(document: &Document) -> Vec<String> {
    document
        .select("img[src]")
        .iter()
        .filter_map(|img| dom::non_empty_attr(&img, "src"))
        .collect()
}

/// Trimmed text of every element named `tag`, or `None` for an unusable name.
fn tag_texts(document: &Document, tag: &str) -> Option<Vec<String>> {
    let selection = dom::select_tag(document, tag)?;
    Some(selection.iter().map(|el| dom::trimmed_text(&el)).collect())
}

fn invalid_tag_warning(tag: &str) -> String {
    let message = format!("tag {tag:?} is not a valid element name; skipped");
    warn!("{message}");
    message
}
