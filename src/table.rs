// src/table.rs
//
// Month-indexed table: one row per month, one column per series. This is
// what the navigator hands to display, export and the chart.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::Month;

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    /// Aligned with `SeriesTable::months`
    pub values: Vec<Option<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesTable {
    months: Vec<Month>,
    columns: Vec<Column>,
}

impl SeriesTable {
    /// Caller guarantees each column has one value per month.
    pub fn new(months: Vec<Month>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == months.len()));
        Self { months, columns }
    }

    /// Outer-join named series on month; column order is kept.
    pub fn from_series(series: Vec<(String, BTreeMap<Month, f64>)>) -> Self {
        let months: Vec<Month> = series
            .iter()
            .flat_map(|(_, s)| s.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let columns = series
            .into_iter()
            .map(|(name, s)| Column {
                values: months.iter().map(|m| s.get(m).copied()).collect(),
                name,
            })
            .collect();

        Self { months, columns }
    }

    /// Same columns, no rows.
    pub fn empty_like(&self) -> Self {
        Self {
            months: Vec::new(),
            columns: self
                .columns
                .iter()
                .map(|c| Column { name: c.name.clone(), values: Vec::new() })
                .collect(),
        }
    }

    pub fn months(&self) -> &[Month] { &self.months }
    pub fn columns(&self) -> &[Column] { &self.columns }

    /// Number of rows (months)
    pub fn len(&self) -> usize { self.months.len() }
    pub fn is_empty(&self) -> bool { self.months.is_empty() }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_of(&self, month: Month) -> Option<usize> {
        self.months.binary_search(&month).ok()
    }

    pub fn value(&self, month: Month, name: &str) -> Option<f64> {
        let row = self.row_of(month)?;
        self.column(name)?.values[row]
    }

    /// Keep rows for which `keep(row_index)` holds.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let kept: Vec<usize> = (0..self.months.len()).filter(|&i| keep(i)).collect();
        self.months = kept.iter().map(|&i| self.months[i]).collect();
        for c in &mut self.columns {
            c.values = kept.iter().map(|&i| c.values[i]).collect();
        }
    }

    /// Drop every row with a missing cell.
    pub fn drop_incomplete(&mut self) {
        let columns = self.columns.clone();
        self.retain_rows(|i| columns.iter().all(|c| c.values[i].is_some()));
    }

    /// Back to long form: (column name, month, value) for every present cell.
    pub fn to_triples(&self) -> Vec<(String, Month, f64)> {
        let mut out = Vec::new();
        for c in &self.columns {
            for (m, v) in self.months.iter().zip(&c.values) {
                if let Some(v) = v {
                    out.push((c.name.clone(), *m, *v));
                }
            }
        }
        out
    }

    /// Header row for export: `month` then column names.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once("month".to_string())
            .chain(self.columns.iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Rows as text; missing cells become empty strings.
    pub fn to_string_rows(&self, precision: usize) -> Vec<Vec<String>> {
        (0..self.months.len())
            .map(|i| {
                std::iter::once(self.months[i].to_string())
                    .chain(self.columns.iter().map(|c| match c.values[i] {
                        Some(v) => format!("{:.*}", precision, v),
                        None => String::new(),
                    }))
                    .collect()
            })
            .collect()
    }

    /// (min, max) over every present cell in rows `from..`.
    pub fn value_range_from(&self, from: usize) -> Option<(f64, f64)> {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter().skip(from).flatten().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
