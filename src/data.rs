// src/data.rs
//
// Typed tables the loaders produce and the navigator reads.
//
// - WeightTable: one row per taxonomy item, keyed by "code label".
// - CpiTable:    one observed index value per (parent, level, name, month),
//                kept sorted by that key so children of a parent are a
//                contiguous run.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::options::Area;
use crate::core::Month;
use crate::error::{Error, Result};

/* ---------------- Weights ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct WeightRow {
    /// Zero-padded 4-digit code
    pub item_code: String,
    pub label: String,
    /// Present only for class rows that break down further.
    pub category_code: Option<String>,
    pub weight_national: f64,
    pub weight_tokyo: f64,
    /// "code label", the join key against CPI names
    pub name: String,
}

impl WeightRow {
    pub fn new(
        item_code: impl Into<String>,
        label: impl Into<String>,
        category_code: Option<String>,
        weight_national: f64,
        weight_tokyo: f64,
    ) -> Self {
        let item_code = item_code.into();
        let label = label.into();
        let name = format!("{} {}", item_code, label);
        Self { item_code, label, category_code, weight_national, weight_tokyo, name }
    }

    pub fn weight(&self, area: Area) -> f64 {
        match area {
            Area::National => self.weight_national,
            Area::Tokyo => self.weight_tokyo,
        }
    }

    /// Class rows can be drilled into.
    pub fn is_selectable(&self) -> bool {
        self.category_code.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct WeightTable {
    rows: Vec<WeightRow>,
    by_name: HashMap<String, usize>,
}

impl WeightTable {
    /// Build from rows in source order. Names must be unique.
    pub fn new(rows: Vec<WeightRow>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(rows.len());
        for (ix, row) in rows.iter().enumerate() {
            if by_name.insert(row.name.clone(), ix).is_some() {
                return Err(Error::schema("weight table", format!("duplicate item {}", row.name)));
            }
        }
        Ok(Self { rows, by_name })
    }

    pub fn rows(&self) -> &[WeightRow] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn get(&self, name: &str) -> Option<&WeightRow> {
        self.by_name.get(name).map(|&ix| &self.rows[ix])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Position in source order; used to keep option lists in sheet order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}

/* ---------------- CPI ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct CpiRecord {
    /// `None` only for the root item.
    pub parent: Option<String>,
    pub level: u32,
    pub name: String,
    pub month: Month,
    pub value: f64,
}

impl CpiRecord {
    pub fn key(&self) -> (Option<&str>, u32, &str, Month) {
        (self.parent.as_deref(), self.level, self.name.as_str(), self.month)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpiTable {
    records: Vec<CpiRecord>,
}

impl CpiTable {
    /// Sort by key and reject duplicate keys.
    pub fn new(mut records: Vec<CpiRecord>) -> Result<Self> {
        records.sort_by(|a, b| a.key().cmp(&b.key()));
        if let Some(w) = records.windows(2).find(|w| w[0].key() == w[1].key()) {
            return Err(Error::schema(
                "e-Stat response",
                format!("duplicate record {} at {}", w[1].name, w[1].month),
            ));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[CpiRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Distinct months, ascending.
    pub fn months(&self) -> Vec<Month> {
        let set: BTreeSet<Month> = self.records.iter().map(|r| r.month).collect();
        set.into_iter().collect()
    }

    pub fn latest_month(&self) -> Option<Month> {
        self.records.iter().map(|r| r.month).max()
    }

    /// Distinct item names.
    pub fn names(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Every value published for `name`, by month.
    pub fn series(&self, name: &str) -> BTreeMap<Month, f64> {
        let mut out = BTreeMap::new();
        for r in self.records.iter().filter(|r| r.name == name) {
            out.entry(r.month).or_insert(r.value);
        }
        out
    }

    /// Records whose parent link equals `parent`; a contiguous run thanks to
    /// the sort order.
    pub fn children_of(&self, parent: &str) -> &[CpiRecord] {
        let lo = self.records.partition_point(|r| r.parent.as_deref() < Some(parent));
        let hi = self.records.partition_point(|r| r.parent.as_deref() <= Some(parent));
        &self.records[lo..hi]
    }
}
