// src/specs/weights.rs
//! Reading *spec* for the item-weight workbook (sheet `品目情報一覧`).
//!
//! Purpose:
//! - Turn the sheet's cell grid into typed [`WeightRow`]s keyed by "code label".
//! - Encode the sheet layout: header on row 2, rows 3-4 are notes, data from
//!   row 5; label hierarchy in columns 0-5, class code in 7, item code in 8,
//!   national weight in 10, Tokyo weight in 12.
//!
//! Responsibilities:
//! - Back-fill a missing item code from the row's class code.
//! - Forward-fill the label hierarchy so each row carries its deepest label.
//! - Fail fast on a layout that does not match (too narrow, too short,
//!   missing codes or weights) instead of mis-aligning columns.
//!
//! Non-Responsibilities:
//! - **No networking or xlsx decoding** (see `fetch`), this works on a grid.

use crate::config::consts::{WEIGHTS_FIRST_DATA_ROW, WEIGHTS_HEADER_ROW, WEIGHTS_ROWS};
use crate::data::{WeightRow, WeightTable};
use crate::error::{Error, Result};

const ORIGIN: &str = "weight workbook";

const COL_LABELS: std::ops::RangeInclusive<usize> = 0..=5;
const COL_CATEGORY: usize = 7;
const COL_ITEM: usize = 8;
const COL_NATIONAL: usize = 10;
const COL_TOKYO: usize = 12;
const MIN_WIDTH: usize = COL_TOKYO + 1;

/// One spreadsheet cell, reduced to what the sheet actually holds.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Cell::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
        }
    }

    fn number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Empty => None,
        }
    }

    /// Codes arrive as numbers (1.0) or text ("0001"); both become "0001".
    fn code(&self) -> Option<Result<String>> {
        let raw = match self {
            Cell::Empty => return None,
            Cell::Number(n) if *n >= 0.0 && n.fract() == 0.0 => *n as u64,
            Cell::Text(s) if s.trim().is_empty() => return None,
            Cell::Text(s) => match s.trim().parse::<u64>() {
                Ok(v) => v,
                Err(_) => return Some(Err(Error::schema(ORIGIN, format!("bad code {s:?}")))),
            },
            Cell::Number(n) => return Some(Err(Error::schema(ORIGIN, format!("bad code {n}")))),
        };
        Some(Ok(format!("{:04}", raw)))
    }
}

fn cell(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&Cell::Empty)
}

/// Shape the whole sheet (row 0 = first sheet row) into a weight table.
pub fn parse_sheet(grid: &[Vec<Cell>]) -> Result<WeightTable> {
    if grid.len() <= WEIGHTS_HEADER_ROW {
        return Err(Error::schema(ORIGIN, "sheet has no header row"));
    }
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    if width < MIN_WIDTH {
        return Err(Error::schema(
            ORIGIN,
            format!("expected at least {MIN_WIDTH} columns, found {width}"),
        ));
    }

    let data = grid.get(WEIGHTS_FIRST_DATA_ROW..).unwrap_or(&[]);
    if data.len() < WEIGHTS_ROWS {
        return Err(Error::schema(
            ORIGIN,
            format!("expected {WEIGHTS_ROWS} data rows, found {}", data.len()),
        ));
    }
    let extra = data[WEIGHTS_ROWS..]
        .iter()
        .filter(|r| r.iter().any(|c| *c != Cell::Empty))
        .count();
    if extra > 0 {
        logw!("Weights: {extra} non-empty row(s) past row {WEIGHTS_ROWS} ignored; has the layout changed?");
    }

    let rows = data[..WEIGHTS_ROWS]
        .iter()
        .enumerate()
        .map(|(i, r)| parse_row(r).map_err(|e| at_row(e, WEIGHTS_FIRST_DATA_ROW + i)))
        .collect::<Result<Vec<_>>>()?;

    logd!("Weights: parsed {} rows", rows.len());
    WeightTable::new(rows)
}

fn at_row(err: Error, sheet_row: usize) -> Error {
    match err {
        Error::Schema { origin, detail } => Error::Schema {
            origin,
            detail: format!("sheet row {}: {}", sheet_row + 1, detail),
        },
        other => other,
    }
}

/// One data row → WeightRow.
pub fn parse_row(row: &[Cell]) -> Result<WeightRow> {
    // Forward fill across the hierarchy: the deepest filled label wins.
    let label = COL_LABELS
        .rev()
        .find_map(|c| cell(row, c).text())
        .ok_or_else(|| Error::schema(ORIGIN, "no label"))?;

    let category_code = cell(row, COL_CATEGORY).code().transpose()?;
    let item_code = match cell(row, COL_ITEM).code().transpose()? {
        Some(code) => code,
        None => category_code
            .clone()
            .ok_or_else(|| Error::schema(ORIGIN, format!("{label}: neither item nor class code")))?,
    };

    let weight = |col: usize, what: &str| {
        cell(row, col)
            .number()
            .filter(|w| *w >= 0.0)
            .ok_or_else(|| Error::schema(ORIGIN, format!("{item_code} {label}: missing {what} weight")))
    };
    let weight_national = weight(COL_NATIONAL, "national")?;
    let weight_tokyo = weight(COL_TOKYO, "Tokyo")?;

    Ok(WeightRow::new(item_code, label, category_code, weight_national, weight_tokyo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Cell { Cell::Text(s.into()) }
    fn n(v: f64) -> Cell { Cell::Number(v) }
    fn e() -> Cell { Cell::Empty }

    fn row(labels: [&str; 6], category: Cell, item: Cell, national: f64, tokyo: f64) -> Vec<Cell> {
        let mut r: Vec<Cell> = labels
            .iter()
            .map(|l| if l.is_empty() { e() } else { t(l) })
            .collect();
        r.push(e());
        r.push(category);
        r.push(item);
        r.push(n(1.0));
        r.push(n(national));
        r.push(e());
        r.push(n(tokyo));
        r
    }

    #[test]
    fn class_row_takes_code_from_category() {
        let r = row(["総合", "", "", "", "", ""], n(1.0), e(), 10000.0, 10000.0);
        let w = parse_row(&r).unwrap();
        assert_eq!(w.name, "0001 総合");
        assert_eq!(w.category_code.as_deref(), Some("0001"));
        assert!(w.is_selectable());
    }

    #[test]
    fn item_row_uses_deepest_label() {
        let r = row(["食料", "穀類", "米類", "", "", "うるち米(A)"], e(), t("1001"), 30.0, 21.0);
        let w = parse_row(&r).unwrap();
        assert_eq!(w.name, "1001 うるち米(A)");
        assert_eq!(w.category_code, None);
        assert_eq!(w.weight_tokyo, 21.0);
    }

    #[test]
    fn label_falls_back_to_ancestor_column() {
        let r = row(["食料", "穀類", "", "", "", ""], n(2.0), e(), 1.0, 1.0);
        assert_eq!(parse_row(&r).unwrap().label, "穀類");
    }

    #[test]
    fn missing_weight_is_a_schema_error() {
        let mut r = row(["食料", "", "", "", "", ""], n(2.0), e(), 1.0, 1.0);
        r[COL_NATIONAL] = e();
        assert!(matches!(parse_row(&r), Err(Error::Schema { .. })));
    }

    #[test]
    fn narrow_sheet_is_rejected() {
        let grid = vec![vec![e(); 5]; WEIGHTS_FIRST_DATA_ROW + WEIGHTS_ROWS];
        assert!(matches!(parse_sheet(&grid), Err(Error::Schema { .. })));
    }
}
