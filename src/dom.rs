//! DOM helpers over the `dom_query` crate.
//!
//! Thin wrappers that give the extraction passes a consistent vocabulary:
//! tag names, trimmed text, collapsed text and non-empty attributes.

pub use dom_query::{Document, Selection};

use crate::patterns::WHITESPACE_RUN;

/// Tag name of the first node in the selection (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Whether the first node in the selection is an element named `name`.
#[must_use]
pub fn is_tag(sel: &Selection, name: &str) -> bool {
    tag_name(sel).is_some_and(|t| t == name)
}

/// Text content with leading and trailing whitespace removed.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// Text content with every whitespace run collapsed to one space, trimmed.
#[must_use]
pub fn collapsed_text(sel: &Selection) -> String {
    WHITESPACE_RUN.replace_all(sel.text().trim(), " ").into_owned()
}

/// Attribute value if present and non-empty. The value is not trimmed.
#[must_use]
pub fn non_empty_attr(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

/// Direct element children whose tag is one of `names`.
#[must_use]
pub fn children_named<'a>(sel: &Selection<'a>, names: &[&str]) -> Vec<Selection<'a>> {
    sel.children()
        .iter()
        .filter(|child| tag_name(child).is_some_and(|t| names.contains(&t.as_str())))
        .collect()
}

/// Every element matching a bare tag name, in document order.
///
/// Returns `None` if `name` is not a usable selector.
#[must_use]
pub fn select_tag<'a>(doc: &'a Document, name: &str) -> Option<Selection<'a>> {
    if !is_tag_name(name) {
        return None;
    }
    Some(doc.select(name))
}

/// Whether `name` looks like an element name (letters, digits, `-`, `_`),
/// starting with a letter.
#[must_use]
pub fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_and_text_helpers() {
        let doc = Document::from("<html><body><H2>  Big \n  News </H2></body></html>");
        let heading = doc.select("h2");

        assert_eq!(tag_name(&heading).as_deref(), Some("h2"));
        assert!(is_tag(&heading, "h2"));
        assert_eq!(trimmed_text(&heading), "Big \n  News");
        assert_eq!(collapsed_text(&heading), "Big News");
    }

    #[test]
    fn test_non_empty_attr() {
        let doc = Document::from(r#"<a href="">x</a><a href=" /a ">y</a>"#);
        let links: Vec<_> = doc.select("a").iter().collect();

        assert_eq!(non_empty_attr(&links[0], "href"), None);
        assert_eq!(non_empty_attr(&links[1], "href").as_deref(), Some(" /a "));
        assert_eq!(non_empty_attr(&links[1], "title"), None);
    }

    #[test]
    fn test_children_named_skips_descendants() {
        let doc = Document::from(
            "<table><tr><td><table><tr><td>inner</td></tr></table></td></tr></table>",
        );
        let outer = doc.select("table").first();
        let bodies = children_named(&outer, &["tbody"]);
        assert_eq!(bodies.len(), 1);
        let rows = children_named(&bodies[0], &["tr"]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_tag_name_validation() {
        assert!(is_tag_name("h1"));
        assert!(is_tag_name("my-widget"));
        assert!(!is_tag_name(""));
        assert!(!is_tag_name("1h"));
        assert!(!is_tag_name("div > p"));
        assert!(!is_tag_name("a[href]"));

        let doc = Document::from("<p>a</p>");
        assert!(select_tag(&doc, "p[").is_none());
        assert_eq!(select_tag(&doc, "p").map(|s| s.length()), Some(1));
    }
}
