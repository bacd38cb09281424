//! XLSX export.
//!
//! One sheet per table (`Table_1`, `Table_2`, ...) followed by single-column
//! `Headlines`, `Links` and `Images` sheets. Custom tags are not exported to
//! the spreadsheet.

use rust_xlsxwriter::{Format, FormatBorder, Workbook};

use crate::error::ExportError;
use crate::result::ScrapeResult;

/// Excel's hard limits.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Contents of one worksheet: a header row, then data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData<'a> {
    /// Worksheet name.
    pub name: String,
    /// Header cells.
    pub header: Vec<&'a str>,
    /// Data rows, aligned with `header`.
    pub rows: Vec<Vec<&'a str>>,
}

/// The sheets a result exports to, in workbook order.
#[must_use]
pub fn sheets(result: &ScrapeResult) -> Vec<SheetData<'_>> {
    let mut sheets: Vec<SheetData<'_>> = result
        .tables
        .iter()
        .enumerate()
        .map(|(index, table)| SheetData {
            name: format!("Table_{}", index + 1),
            header: table.columns.iter().map(String::as_str).collect(),
            rows: table
                .rows
                .iter()
                .map(|row| row.iter().map(String::as_str).collect())
                .collect(),
        })
        .collect();

    for (name, values) in [
        ("Headlines", &result.headlines),
        ("Links", &result.links),
        ("Images", &result.images),
    ] {
        sheets.push(SheetData {
            name: name.to_string(),
            header: vec![name],
            rows: values.iter().map(|v| vec![v.as_str()]).collect(),
        });
    }

    sheets
}

/// Render `result` as an XLSX workbook.
pub fn to_xlsx_bytes(result: &ScrapeResult) -> Result<Vec<u8>, ExportError> {
    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let mut workbook = Workbook::new();

    for sheet in sheets(result) {
        check_limits(&sheet)?;
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, text) in sheet.header.iter().enumerate() {
            worksheet.write_string_with_format(0, column_index(col)?, *text, &header_format)?;
        }
        for (row_offset, row) in sheet.rows.iter().enumerate() {
            let row_index = row_index(row_offset + 1)?;
            for (col, text) in row.iter().enumerate() {
                if !text.is_empty() {
                    worksheet.write_string(row_index, column_index(col)?, *text)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn check_limits(sheet: &SheetData<'_>) -> Result<(), ExportError> {
    if sheet.rows.len() + 1 > MAX_ROWS {
        return Err(ExportError::Limit(format!(
            "sheet {} has {} rows, more than {MAX_ROWS}",
            sheet.name,
            sheet.rows.len() + 1
        )));
    }
    if sheet.header.len() > MAX_COLUMNS {
        return Err(ExportError::Limit(format!(
            "sheet {} has {} columns, more than {MAX_COLUMNS}",
            sheet.name,
            sheet.header.len()
        )));
    }
    Ok(())
}

fn row_index(row: usize) -> Result<u32, ExportError> {
    u32::try_from(row).map_err(|_| ExportError::Limit(format!("row {row} out of range")))
}

fn column_index(col: usize) -> Result<u16, ExportError> {
    u16::try_from(col).map_err(|_| ExportError::Limit(format!("column {col} out of range")))
}
