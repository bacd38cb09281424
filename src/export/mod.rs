//! Export of a [`ScrapeResult`] to a downloadable artifact.
//!
//! Export only reads the result, so a failed export leaves it intact and
//! another format can be tried.

pub mod json;
pub mod spreadsheet;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::result::ScrapeResult;

/// Timestamp format used in artifact file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Pretty-printed JSON document.
    #[default]
    Json,
    /// XLSX workbook.
    Spreadsheet,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Spreadsheet => "xlsx",
        }
    }

    /// MIME type attached to the artifact.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Spreadsheet => f.write_str("Excel"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "excel" | "xlsx" | "spreadsheet" => Ok(Self::Spreadsheet),
            other => Err(format!(
                "unknown export format {other:?} (expected json or xlsx)"
            )),
        }
    }
}

/// A finished export, ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `scraped_data_<YYYYMMDD_HHMMSS>.<ext>`
    pub file_name: String,
    /// Format of `bytes`.
    pub format: ExportFormat,
    /// MIME type for `bytes`.
    pub content_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Write the artifact into `dir` and return its path.
    ///
    /// The bytes go to a hidden `.part` file that is renamed into place, so
    /// a failed write never leaves a partial artifact under the final name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let target = dir.join(&self.file_name);
        let partial = dir.join(format!(".{}.part", self.file_name));

        let written = fs::write(&partial, &self.bytes).and_then(|()| fs::rename(&partial, &target));
        if let Err(err) = written {
            let _ = fs::remove_file(&partial);
            return Err(err.into());
        }

        info!(path = %target.display(), bytes = self.bytes.len(), "artifact written");
        Ok(target)
    }
}

/// Artifact file name for a capture time.
#[must_use]
pub fn file_name(format: ExportFormat, captured_at: NaiveDateTime) -> String {
    format!(
        "scraped_data_{}.{}",
        captured_at.format(TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// Export `result`, stamping the file name with the current local time.
pub fn export(result: &ScrapeResult, format: ExportFormat) -> Result<Artifact, ExportError> {
    export_at(result, format, Local::now().naive_local())
}

/// Export `result` with an explicit capture time.
pub fn export_at(
    result: &ScrapeResult,
    format: ExportFormat,
    captured_at: NaiveDateTime,
) -> Result<Artifact, ExportError> {
    let bytes = match format {
        ExportFormat::Json => json::to_json_bytes(result)?,
        ExportFormat::Spreadsheet => spreadsheet::to_xlsx_bytes(result)?,
    };
    let artifact = Artifact {
        file_name: file_name(format, captured_at),
        format,
        content_type: format.content_type(),
        bytes,
    };
    debug!(file = %artifact.file_name, bytes = artifact.bytes.len(), "export built");
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn captured() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 30))
            .unwrap()
    }

    #[test]
    fn test_file_names_carry_second_resolution_timestamp() {
        assert_eq!(
            file_name(ExportFormat::Json, captured()),
            "scraped_data_20250307_090530.json"
        );
        assert_eq!(
            file_name(ExportFormat::Spreadsheet, captured()),
            "scraped_data_20250307_090530.xlsx"
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("Excel".parse::<ExportFormat>(), Ok(ExportFormat::Spreadsheet));
        assert_eq!(" xlsx ".parse::<ExportFormat>(), Ok(ExportFormat::Spreadsheet));
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_artifact_metadata() {
        let result = ScrapeResult::default();
        let artifact = export_at(&result, ExportFormat::Json, captured()).unwrap();
        assert_eq!(artifact.content_type, "application/json");
        assert_eq!(artifact.format, ExportFormat::Json);

        let artifact = export_at(&result, ExportFormat::Spreadsheet, captured()).unwrap();
        assert_eq!(
            artifact.content_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert!(artifact.file_name.ends_with(".xlsx"));
    }

    #[test]
    fn test_write_to_missing_directory_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let artifact = export_at(&ScrapeResult::default(), ExportFormat::Json, captured()).unwrap();

        assert!(matches!(artifact.write_to(&missing), Err(ExportError::Io(_))));
        assert!(!missing.exists());
    }
}
