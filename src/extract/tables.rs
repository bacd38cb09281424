//! `<table>` to [`Table`] conversion.
//!
//! Rows are taken only from the table itself (direct `tr`, or `tr` inside its
//! own `thead`/`tbody`/`tfoot`), so nested tables never leak rows into their
//! parent. `colspan` and `rowspan` are expanded into repeated values.
//!
//! Header selection: the last `<thead>` row if any, otherwise the first row
//! when it is made only of `<th>` cells. Without a header, columns are named
//! by position (`"0"`, `"1"`, ...).

use crate::dom::{self, Selection};
use crate::result::Table;

/// Cells (after span expansion) a single table may hold.
pub const MAX_TABLE_CELLS: usize = 20_000;

/// HTML caps `colspan` at 1000 and `rowspan` at 65534.
const MAX_COLSPAN: usize = 1_000;
const MAX_ROWSPAN: usize = 65_534;

/// Why a single table could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No row contains any cell.
    #[error("table has no cells")]
    Empty,

    /// Span expansion exceeded [`MAX_TABLE_CELLS`].
    #[error("table exceeds {MAX_TABLE_CELLS} cells")]
    TooLarge,
}

/// Row group a `tr` belongs to. Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Head,
    Body,
    Foot,
}

/// One row after span expansion.
#[derive(Debug)]
struct GridRow {
    section: Section,
    cells: Vec<String>,
    all_th: bool,
}

/// Convert one `<table>` selection.
pub fn parse_table(table: &Selection) -> Result<Table, TableError> {
    let grid = expand_spans(table_rows(table))?;
    if grid.is_empty() {
        return Err(TableError::Empty);
    }
    Ok(build_table(grid))
}

/// Rows owned by `table`, grouped head, body, foot (stable within a group).
fn table_rows<'a>(table: &Selection<'a>) -> Vec<(Section, Selection<'a>)> {
    let mut rows = Vec::new();
    for child in dom::children_named(table, &["thead", "tbody", "tfoot", "tr"]) {
        let section = match dom::tag_name(&child).as_deref() {
            Some("thead") => Section::Head,
            Some("tfoot") => Section::Foot,
            _ => Section::Body,
        };
        if dom::is_tag(&child, "tr") {
            rows.push((section, child));
        } else {
            rows.extend(
                dom::children_named(&child, &["tr"])
                    .into_iter()
                    .map(|tr| (section, tr)),
            );
        }
    }
    rows.sort_by_key(|(section, _)| *section);
    rows
}

fn parse_span(value: Option<&str>, max: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(1, |n| n.min(max))
}

/// Count `n` more expanded cells against [`MAX_TABLE_CELLS`].
fn charge(total: &mut usize, n: usize) -> Result<(), TableError> {
    *total = total.saturating_add(n);
    if *total > MAX_TABLE_CELLS {
        return Err(TableError::TooLarge);
    }
    Ok(())
}

/// Fill cells carried down by earlier `rowspan`s, starting at `col`.
/// Every copied cell counts towards `total`.
fn push_rowspan_cells(
    carried: &mut [Option<(usize, String)>],
    cells: &mut Vec<String>,
    col: &mut usize,
    total: &mut usize,
) -> Result<(), TableError> {
    while *col < carried.len() {
        let Some((remaining, value)) = carried[*col].take() else {
            break;
        };
        charge(total, 1)?;
        if remaining > 1 {
            carried[*col] = Some((remaining - 1, value.clone()));
        }
        cells.push(value);
        *col += 1;
    }
    Ok(())
}

fn expand_spans(rows: Vec<(Section, Selection)>) -> Result<Vec<GridRow>, TableError> {
    let mut grid = Vec::with_capacity(rows.len());
    let mut carried: Vec<Option<(usize, String)>> = Vec::new();
    let mut total_cells: usize = 0;

    for (section, tr) in rows {
        let cells = dom::children_named(&tr, &["td", "th"]);
        if cells.is_empty() {
            continue;
        }

        let all_th = cells.iter().all(|cell| dom::is_tag(cell, "th"));
        let mut row: Vec<String> = Vec::with_capacity(cells.len());
        let mut col: usize = 0;

        for cell in &cells {
            push_rowspan_cells(&mut carried, &mut row, &mut col, &mut total_cells)?;

            let text = dom::collapsed_text(cell);
            let colspan = parse_span(cell.attr("colspan").as_deref(), MAX_COLSPAN);
            let rowspan = parse_span(cell.attr("rowspan").as_deref(), MAX_ROWSPAN);

            charge(&mut total_cells, colspan)?;

            if carried.len() < col + colspan {
                carried.resize_with(col + colspan, || None);
            }
            for offset in 0..colspan {
                if rowspan > 1 {
                    carried[col + offset] = Some((rowspan - 1, text.clone()));
                }
                row.push(text.clone());
            }
            col += colspan;
        }
        push_rowspan_cells(&mut carried, &mut row, &mut col, &mut total_cells)?;

        grid.push(GridRow {
            section,
            cells: row,
            all_th,
        });
    }

    Ok(grid)
}

fn build_table(mut grid: Vec<GridRow>) -> Table {
    let header_index = grid
        .iter()
        .rposition(|row| row.section == Section::Head)
        .or_else(|| grid.first().filter(|row| row.all_th).map(|_| 0));

    let width = grid.iter().map(|row| row.cells.len()).max().unwrap_or(0);

    let (columns, data_start) = match header_index {
        Some(index) => (header_columns(&grid[index].cells, width), index + 1),
        None => ((0..width).map(|i| i.to_string()).collect(), 0),
    };

    let rows = grid
        .drain(data_start..)
        .map(|row| {
            let mut cells = row.cells;
            cells.resize(width, String::new());
            cells
        })
        .collect();

    Table { columns, rows }
}

/// Header texts padded to `width`, blanks named `Unnamed: <i>`, duplicates
/// suffixed `.1`, `.2`, ...
fn header_columns(cells: &[String], width: usize) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(width);
    for index in 0..width {
        let base = match cells.get(index) {
            Some(text) if !text.is_empty() => text.clone(),
            _ => format!("Unnamed: {index}"),
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while columns.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        columns.push(name);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn parse_first(html: &str) -> Result<Table, TableError> {
        let doc = Document::from(html);
        parse_table(&doc.select("table").first())
    }

    #[test]
    fn test_first_th_row_becomes_header() {
        let table = parse_first(
            "<table><tr><th>Name</th><th>Age</th></tr>\
             <tr><td>Ada</td><td>36</td></tr>\
             <tr><td>Alan</td><td>41</td></tr></table>",
        )
        .unwrap();

        assert_eq!(table.columns, vec!["Name", "Age"]);
        assert_eq!(table.rows, vec![vec!["Ada", "36"], vec!["Alan", "41"]]);
    }

    #[test]
    fn test_thead_is_header_and_tfoot_goes_last() {
        let table = parse_first(
            "<table><tfoot><tr><td>Total</td><td>77</td></tr></tfoot>\
             <thead><tr><td>Name</td><td>Age</td></tr></thead>\
             <tbody><tr><td>Ada</td><td>36</td></tr></tbody></table>",
        )
        .unwrap();

        assert_eq!(table.columns, vec!["Name", "Age"]);
        assert_eq!(table.rows, vec![vec!["Ada", "36"], vec!["Total", "77"]]);
    }

    #[test]
    fn test_positional_columns_without_header() {
        let table = parse_first("<table><tr><td>a</td><td>b</td></tr></table>").unwrap();
        assert_eq!(table.columns, vec!["0", "1"]);
        assert_eq!(table.rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_irregular_rows_are_padded() {
        let table = parse_first(
            "<table><tr><th>A</th></tr>\
             <tr><td>1</td><td>2</td><td>3</td></tr>\
             <tr><td>4</td></tr></table>",
        )
        .unwrap();

        assert_eq!(table.columns, vec!["A", "Unnamed: 1", "Unnamed: 2"]);
        assert_eq!(table.rows, vec![vec!["1", "2", "3"], vec!["4", "", ""]]);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let table = parse_first(
            "<table><tr><th>X</th><th>X</th><th></th><th>X</th></tr>\
             <tr><td>1</td><td>2</td><td>3</td><td>4</td></tr></table>",
        )
        .unwrap();
        assert_eq!(table.columns, vec!["X", "X.1", "Unnamed: 2", "X.2"]);
    }

    #[test]
    fn test_colspan_and_rowspan_expand() {
        let table = parse_first(
            "<table><tr><th>H1</th><th>H2</th></tr>\
             <tr><td colspan=\"2\">X</td></tr>\
             <tr><td rowspan=\"2\">A</td><td>B1</td></tr>\
             <tr><td>B2</td></tr></table>",
        )
        .unwrap();

        assert_eq!(
            table.rows,
            vec![vec!["X", "X"], vec!["A", "B1"], vec!["A", "B2"]]
        );
    }

    #[test]
    fn test_nested_table_rows_stay_in_nested_table() {
        let html = "<table><tr><th>Outer</th></tr>\
                    <tr><td><table><tr><td>inner</td></tr></table></td></tr></table>";
        let doc = Document::from(html);
        let tables: Vec<_> = doc.select("table").iter().collect();
        assert_eq!(tables.len(), 2);

        let outer = parse_table(&tables[0]).unwrap();
        assert_eq!(outer.columns, vec!["Outer"]);
        assert_eq!(outer.rows, vec![vec!["inner"]]);

        let inner = parse_table(&tables[1]).unwrap();
        assert_eq!(inner.rows, vec![vec!["inner"]]);
    }

    #[test]
    fn test_cell_text_is_collapsed() {
        let table = parse_first("<table><tr><td>  two\n   words </td></tr></table>").unwrap();
        assert_eq!(table.rows, vec![vec!["two words"]]);
    }

    #[test]
    fn test_header_only_table_has_no_rows() {
        let table = parse_first("<table><tr><th>A</th><th>B</th></tr></table>").unwrap();
        assert_eq!(table.columns, vec!["A", "B"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_tables_fail() {
        assert_eq!(parse_first("<table></table>"), Err(TableError::Empty));
        assert_eq!(parse_first("<table><tr></tr></table>"), Err(TableError::Empty));
    }

    #[test]
    fn test_oversized_tables_fail() {
        let html = format!(
            "<table><tr><td colspan=\"1000\">x</td></tr>{}</table>",
            "<tr><td colspan=\"1000\">y</td></tr>".repeat(20)
        );
        assert_eq!(parse_first(&html), Err(TableError::TooLarge));
    }

    #[test]
    fn test_rowspan_copies_count_towards_the_cap() {
        let html = format!(
            "<table><tr><td colspan=\"1000\" rowspan=\"65534\">x</td></tr>{}</table>",
            "<tr><td>y</td></tr>".repeat(200)
        );
        assert_eq!(parse_first(&html), Err(TableError::TooLarge));
    }

    #[test]
    fn test_rowspan_below_the_cap_still_parses() {
        let html = format!(
            "<table><tr><td rowspan=\"65534\">x</td><td>a</td></tr>{}</table>",
            "<tr><td>b</td></tr>".repeat(100)
        );
        let table = parse_first(&html).unwrap();
        assert_eq!(table.rows.len(), 101);
        assert_eq!(table.rows[100], vec!["x", "b"]);
    }

    #[test]
    fn test_span_parsing() {
        assert_eq!(parse_span(None, 10), 1);
        assert_eq!(parse_span(Some("0"), 10), 1);
        assert_eq!(parse_span(Some(" 3 "), 10), 3);
        assert_eq!(parse_span(Some("abc"), 10), 1);
        assert_eq!(parse_span(Some("500"), 10), 10);
    }
}
