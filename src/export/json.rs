//! JSON export: the whole result as one pretty-printed document.

use crate::error::ExportError;
use crate::result::ScrapeResult;

/// Serialize `result` as UTF-8 JSON with 2-space indentation.
pub fn to_json_bytes(result: &ScrapeResult) -> Result<Vec<u8>, ExportError> {
    let mut bytes = serde_json::to_vec_pretty(result)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Read a JSON export back into a result.
///
/// Tables come back with the columns seen in their row objects; a table that
/// had a header but no rows comes back with no columns.
pub fn from_json_slice(bytes: &[u8]) -> Result<ScrapeResult, ExportError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Table;

    #[test]
    fn test_layout_and_key_order() {
        let result = ScrapeResult {
            tables: vec![Table {
                columns: vec!["b".to_string(), "a".to_string()],
                rows: vec![vec!["2".to_string(), "1".to_string()]],
            }],
            headlines: vec!["Hello".to_string()],
            ..ScrapeResult::default()
        };

        let text = String::from_utf8(to_json_bytes(&result).unwrap()).unwrap();
        let expected = r#"{
  "tables": [
    [
      {
        "b": "2",
        "a": "1"
      }
    ]
  ],
  "headlines": [
    "Hello"
  ],
  "links": [],
  "images": [],
  "custom_tags": []
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_round_trip_with_warnings() {
        let result = ScrapeResult {
            links: vec!["https://example.com/".to_string()],
            warnings: vec!["table 2: table has no cells; skipped".to_string()],
            ..ScrapeResult::default()
        };
        let bytes = to_json_bytes(&result).unwrap();
        assert_eq!(from_json_slice(&bytes).unwrap(), result);
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(matches!(from_json_slice(b"{\"tables\": 3}"), Err(ExportError::Json(_))));
    }
}
