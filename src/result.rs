//! Result types for scrape output.
//!
//! A [`ScrapeResult`] holds one sequence per extraction pass. A pass that was
//! not requested leaves its sequence empty; fields are never absent.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One extracted table: named columns and rows of cell text.
///
/// Every row has exactly `columns.len()` cells. Column names are unique.
///
/// Serialises as an array of row objects (`column -> cell`), keys in column
/// order. Column names live only in the row keys, so a table with a header
/// but no data rows serialises as `[]` and reads back with no columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Data rows, each aligned with `columns`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row`, looked up by column name.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// Rows as `(column, cell)` pairs, in column order.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &str)>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for record in self.records() {
            seq.serialize_element(&Record(&record))?;
        }
        seq.end()
    }
}

struct Record<'a>(&'a [(&'a str, &'a str)]);

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, cell) in self.0 {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(TableVisitor)
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = Table;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of row objects")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Table, A::Error> {
        let mut table = Table::default();
        while let Some(RowEntries(entries)) = seq.next_element()? {
            let mut row = vec![String::new(); table.columns.len()];
            for (column, cell) in entries {
                match table.columns.iter().position(|c| *c == column) {
                    Some(index) => row[index] = cell,
                    None => {
                        // New column: earlier rows get an empty cell.
                        for earlier in &mut table.rows {
                            earlier.push(String::new());
                        }
                        table.columns.push(column);
                        row.push(cell);
                    }
                }
            }
            table.rows.push(row);
        }
        Ok(table)
    }
}

/// A row object, kept in key order.
struct RowEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for RowEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = RowEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a row object")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<RowEntries, M::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((column, CellText(cell))) = map.next_entry::<String, CellText>()? {
                    entries.push((column, cell));
                }
                Ok(RowEntries(entries))
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Cell value read back as text. Scalars are stringified, null is empty.
struct CellText(String);

impl<'de> Deserialize<'de> for CellText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CellVisitor;

        impl Visitor<'_> for CellVisitor {
            type Value = CellText;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, boolean or null cell")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<CellText, E> {
                Ok(CellText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<CellText, E> {
                Ok(CellText(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellText, E> {
                Ok(CellText(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellText, E> {
                Ok(CellText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellText, E> {
                Ok(CellText(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellText, E> {
                Ok(CellText(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<CellText, E> {
                Ok(CellText(String::new()))
            }

            fn visit_none<E: de::Error>(self) -> Result<CellText, E> {
                Ok(CellText(String::new()))
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// Output of one extraction.
///
/// Built once per successful fetch and parse, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// Tables in document order.
    pub tables: Vec<Table>,

    /// Headline texts, grouped by requested tag in request order.
    pub headlines: Vec<String>,

    /// Absolute link targets (`href` starting with `http`), verbatim.
    pub links: Vec<String>,

    /// Image `src` values, verbatim.
    pub images: Vec<String>,

    /// Trimmed text of elements matching the custom tag.
    pub custom_tags: Vec<String>,

    /// Non-fatal problems, such as tables that could not be converted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ScrapeResult {
    /// Whether no pass produced anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.headlines.is_empty()
            && self.links.is_empty()
            && self.images.is_empty()
            && self.custom_tags.is_empty()
    }
}
