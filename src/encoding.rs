//! Character encoding detection and transcoding for fetched pages.
//!
//! The charset is taken from the `Content-Type` response header when present,
//! then from a `<meta>` declaration near the top of the document, and falls
//! back to UTF-8. Decoding is always lossy.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes of the document searched for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` and the `charset=` part of
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>/]+)"#).expect("valid regex")
});

/// Charset label from a `Content-Type` header value, e.g.
/// `text/html; charset=ISO-8859-1` -> `ISO-8859-1`.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then_some(value)
        } else {
            None
        }
    })
}

/// Charset label declared by a `<meta>` tag in the first bytes of `html`.
#[must_use]
pub fn sniff_meta_charset(html: &[u8]) -> Option<String> {
    let head = &html[..html.len().min(SNIFF_LEN)];
    let head = String::from_utf8_lossy(head);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pick the encoding for a response body.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    let from_header = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = from_header {
        return encoding;
    }

    sniff_meta_charset(body)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a response body to UTF-8, replacing invalid sequences with U+FFFD.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_meta() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Caf\xE9</body></html>"#;
        let encoding = detect_encoding(html, Some("text/html; charset=ISO-8859-1"));
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn meta_charset_used_without_header_charset() {
        let html = br#"<html><head><meta charset="windows-1252"></head></html>"#;
        assert_eq!(detect_encoding(html, Some("text/html")).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_declaration_is_recognised() {
        let html = br#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=ISO-8859-1">"#;
        assert_eq!(sniff_meta_charset(html).as_deref(), Some("ISO-8859-1"));
    }

    #[test]
    fn unknown_labels_fall_back_to_utf8() {
        let html = br#"<meta charset="no-such-charset">"#;
        assert_eq!(detect_encoding(html, Some("text/html; charset=bogus")), UTF_8);
        assert_eq!(detect_encoding(b"<p>plain</p>", None), UTF_8);
    }

    #[test]
    fn content_type_parsing() {
        assert_eq!(charset_from_content_type("text/html; charset=\"UTF-8\""), Some("UTF-8"));
        assert_eq!(charset_from_content_type("text/html;Charset=koi8-r"), Some("koi8-r"));
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("text/html; charset="), None);
    }

    #[test]
    fn decode_windows1252_body() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hello\x94</body></html>";
        assert!(decode_body(body, None).contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn decode_invalid_utf8_is_lossy() {
        let body = b"<p>Test \xFF\xFE Invalid</p>";
        let text = decode_body(body, Some("text/html; charset=utf-8"));
        assert!(text.contains("Test"));
        assert!(text.contains('\u{FFFD}'));
    }
}
