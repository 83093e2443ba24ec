// src/transform.rs
//
// Display transforms over a step's table. Results are fractions (0.05 = 5%);
// the frontends scale for display.

use std::collections::HashMap;

use crate::core::Month;
use crate::table::{Column, SeriesTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Change relative to the value in the base month.
    IndexVsBase(Month),
    /// Change relative to the same month one year earlier.
    YearOverYear,
}

impl DisplayMode {
    /// Axis label.
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::IndexVsBase(_) => "指数(基準月比%)",
            DisplayMode::YearOverYear => "前年同月比%",
        }
    }
}

/// Apply `mode` and keep only months where every column has a value.
///
/// A base month missing from the table gives an empty table (same columns),
/// which callers present as "no data for the base month".
pub fn apply(table: &SeriesTable, mode: DisplayMode) -> SeriesTable {
    let mut out = match mode {
        DisplayMode::IndexVsBase(base) => match table.row_of(base) {
            Some(row) => vs_base(table, row),
            None => {
                logd!("Transform: base month {} not in table", base);
                return table.empty_like();
            }
        },
        DisplayMode::YearOverYear => year_over_year(table),
    };
    out.drop_incomplete();
    out
}

fn change(v: Option<f64>, base: Option<f64>) -> Option<f64> {
    match (v, base) {
        (Some(v), Some(b)) if b != 0.0 => Some((v - b) / b),
        _ => None,
    }
}

fn vs_base(table: &SeriesTable, base_row: usize) -> SeriesTable {
    let columns = table
        .columns()
        .iter()
        .map(|c| {
            let base = c.values[base_row];
            Column {
                name: c.name.clone(),
                values: c.values.iter().map(|&v| change(v, base)).collect(),
            }
        })
        .collect();
    SeriesTable::new(table.months().to_vec(), columns)
}

fn year_over_year(table: &SeriesTable) -> SeriesTable {
    let rows: HashMap<Month, usize> =
        table.months().iter().enumerate().map(|(i, m)| (*m, i)).collect();
    let prior: Vec<Option<usize>> = table
        .months()
        .iter()
        .map(|m| rows.get(&m.offset(-12)).copied())
        .collect();

    let columns = table
        .columns()
        .iter()
        .map(|c| Column {
            name: c.name.clone(),
            values: c
                .values
                .iter()
                .zip(&prior)
                .map(|(&v, p)| change(v, p.and_then(|p| c.values[p])))
                .collect(),
        })
        .collect();
    SeriesTable::new(table.months().to_vec(), columns)
}
