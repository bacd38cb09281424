//! Plain-text rendering of a scrape result for terminal display.
//!
//! Tables are drawn as GitHub Flavored Markdown tables; the other passes are
//! bulleted lists. Empty sections are left out.

use crate::result::{ScrapeResult, Table};

/// Render every non-empty section of `result`.
#[must_use]
pub fn render_text(result: &ScrapeResult) -> String {
    if result.is_empty() {
        return "No scraping results available.\n".to_string();
    }

    let mut out = String::new();

    if !result.tables.is_empty() {
        out.push_str("## Tables\n\n");
        for (index, table) in result.tables.iter().enumerate() {
            out.push_str(&format!("Table {}\n\n", index + 1));
            out.push_str(&table_to_markdown(table));
            out.push('\n');
        }
    }

    for (title, items) in [
        ("Headlines", &result.headlines),
        ("Links", &result.links),
        ("Images", &result.images),
        ("Custom Tags", &result.custom_tags),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("## {title}\n\n"));
        for item in items {
            out.push_str("- ");
            out.push_str(item);
            out.push('\n');
        }
        out.push('\n');
    }

    if !result.warnings.is_empty() {
        out.push_str("## Warnings\n\n");
        for warning in &result.warnings {
            out.push_str("- ");
            out.push_str(warning);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Render a table as a GFM table with padded columns.
///
/// ```text
/// | Name | Age |
/// | ---- | --- |
/// | Ada  | 36  |
/// ```
#[must_use]
pub fn table_to_markdown(table: &Table) -> String {
    let header: Vec<String> = table.columns.iter().map(|c| escape_cell(c)).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| escape_cell(c)).collect())
        .collect();

    // Minimum width for ---
    let mut widths: Vec<usize> = vec![3; header.len()];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();
    push_row(&mut output, &header, &widths);

    output.push('|');
    for width in &widths {
        output.push(' ');
        output.push_str(&"-".repeat(*width));
        output.push_str(" |");
    }
    output.push('\n');

    for row in &rows {
        push_row(&mut output, row, &widths);
    }
    output
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    output.push('|');
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        output.push(' ');
        output.push_str(&pad_cell(cell, *width));
        output.push_str(" |");
    }
    output.push('\n');
}

fn pad_cell(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - len))
}

/// Pipes and backslashes would break the table; newlines never occur in
/// collapsed cell text but are flattened just in case.
fn escape_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '|' => out.push_str("\\|"),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}
