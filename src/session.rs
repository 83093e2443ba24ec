// src/session.rs
//
// Everything a dashboard session needs, loaded once at session start and
// then only read: the weight table and one CPI table per area.

use std::collections::BTreeMap;

use crate::{
    config::options::{Area, SourceOptions},
    core::Month,
    data::{CpiTable, WeightTable},
    error::{Error, Result},
    fetch::{self, StatsApi, WeightSource},
    navigator::Navigator,
    progress::Progress,
};

#[derive(Clone, Debug)]
pub struct Session {
    weights: WeightTable,
    cpi: BTreeMap<Area, CpiTable>,
}

impl Session {
    /// Build from tables already in memory.
    pub fn from_parts(weights: WeightTable, cpi: BTreeMap<Area, CpiTable>) -> Self {
        let session = Self { weights, cpi };
        session.report_join();
        session
    }

    /// Fetch weights plus CPI for `areas` over the configured range.
    pub fn load(
        opts: &SourceOptions,
        api: &dyn StatsApi,
        weights: &dyn WeightSource,
        areas: &[Area],
        progress: &mut dyn Progress,
    ) -> Result<Self> {
        let (start, end) = (opts.start, opts.end_month());
        if end < start {
            return Err(Error::Config(format!("end month {end} precedes start month {start}")));
        }

        progress.log("Fetching item weights…");
        let weights = fetch::collect_weights(weights)?;

        let mut cpi = BTreeMap::new();
        for &area in areas {
            let table = fetch::collect_cpi(api, area, start, end, &mut *progress)?;
            cpi.insert(area, table);
        }
        Ok(Self::from_parts(weights, cpi))
    }

    pub fn weights(&self) -> &WeightTable { &self.weights }

    pub fn cpi(&self, area: Area) -> Option<&CpiTable> {
        self.cpi.get(&area)
    }

    pub fn latest_month(&self, area: Area) -> Option<Month> {
        self.cpi(area).and_then(CpiTable::latest_month)
    }

    /// Months available for `area`, ascending (base-month choices).
    pub fn months(&self, area: Area) -> Vec<Month> {
        self.cpi(area).map(CpiTable::months).unwrap_or_default()
    }

    pub fn navigator(&self, area: Area) -> Result<Navigator<'_>> {
        let cpi = self
            .cpi(area)
            .ok_or_else(|| Error::Config(format!("no CPI table loaded for {area}")))?;
        Ok(Navigator::new(&self.weights, cpi, area))
    }

    /// CPI names with no weight row. Those never show up as children; worth
    /// a log line when the two sources drift apart.
    fn report_join(&self) {
        for (area, table) in &self.cpi {
            let missing: Vec<&str> = table
                .names()
                .into_iter()
                .filter(|n| !self.weights.contains(n))
                .collect();
            if missing.is_empty() {
                logf!("Session: {} all {} CPI items have weights", area, table.names().len());
            } else {
                logw!(
                    "Session: {} {} CPI item(s) without weights, e.g. {}",
                    area,
                    missing.len(),
                    missing.iter().take(5).copied().collect::<Vec<_>>().join(", ")
                );
            }
        }
    }
}
