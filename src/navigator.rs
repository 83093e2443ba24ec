// src/navigator.rs
//
// Drill-down through the item taxonomy, one step per selected item.
//
// A step for item X yields X's own series, the series of X's direct
// children (one column each) and every child's share of X's weight. The
// children's weights must add up to X's weight; a mismatch is reported as
// an integrity error, never papered over.
//
// Root rule: the source files items without a parent under the top-level
// sentinel "0", and the root item itself has no parent at all. So the root's
// children are found under "0", everybody else's under their own item code.

use std::collections::{BTreeMap, HashMap};

use crate::{
    config::consts::{ROOT_ITEM, TOP_LEVEL_PARENT, WEIGHT_TOLERANCE},
    config::options::Area,
    core::Month,
    data::{CpiTable, WeightTable},
    error::{Error, Result},
    table::SeriesTable,
};

/// Child name → child weight / selected item's weight.
pub type WeightRatios = BTreeMap<String, f64>;

/// Output of one drill-down step.
#[derive(Clone, Debug)]
pub struct Step {
    /// Items visited so far, root first; the last one is the selected item.
    pub levels: Vec<String>,
    /// Parent link the children were found under.
    pub child_parent: String,
    /// Selected item first, then one column per child.
    pub table: SeriesTable,
    pub ratios: WeightRatios,
    /// Children that can be drilled into, in weight-table order.
    pub options: Vec<String>,
}

impl Step {
    pub fn item(&self) -> &str {
        self.levels.last().map(String::as_str).unwrap_or(ROOT_ITEM)
    }

    /// No selectable children: the walk cannot go deeper.
    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }

    /// Child column names (everything but the selected item).
    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.table.columns().iter().skip(1).map(|c| c.name.as_str())
    }
}

/// Every step of a finished walk; the last one is what gets displayed.
#[derive(Clone, Debug)]
pub struct Walk {
    pub steps: Vec<Step>,
}

impl Walk {
    pub fn last(&self) -> &Step {
        // A walk always holds the root step.
        &self.steps[self.steps.len() - 1]
    }

    pub fn levels(&self) -> &[String] {
        &self.last().levels
    }
}

pub struct Navigator<'a> {
    weights: &'a WeightTable,
    cpi: &'a CpiTable,
    area: Area,
}

impl<'a> Navigator<'a> {
    /// `cpi` must be the table of the same `area`.
    pub fn new(weights: &'a WeightTable, cpi: &'a CpiTable, area: Area) -> Self {
        Self { weights, cpi, area }
    }

    pub fn area(&self) -> Area { self.area }

    /// Where the children of `item` sit in the CPI table.
    pub fn child_locator(&self, item: &str) -> Result<String> {
        if item == ROOT_ITEM {
            return Ok(TOP_LEVEL_PARENT.to_string());
        }
        self.weights
            .get(item)
            .map(|w| w.item_code.clone())
            .ok_or_else(|| Error::UnknownItem(item.to_string()))
    }

    /// Initial state: the root item, always available.
    pub fn root(&self) -> Result<Step> {
        self.step(vec![ROOT_ITEM.to_string()])
    }

    /// Move one level down. `choice` must be one of `from.options`.
    pub fn descend(&self, from: &Step, choice: &str) -> Result<Step> {
        if !from.options.iter().any(|o| o == choice) {
            return Err(Error::InvalidSelection {
                parent: from.item().to_string(),
                choice: choice.to_string(),
            });
        }
        let mut levels = from.levels.clone();
        levels.push(choice.to_string());
        self.step(levels)
    }

    /// Run the state machine over externally supplied choices. The path may
    /// start with the root item or directly with its first child. Running out
    /// of choices stops the walk; so does reaching an item with nothing left
    /// to select.
    pub fn walk<S: AsRef<str>>(&self, choices: &[S]) -> Result<Walk> {
        let mut rest = choices.iter().map(|c| c.as_ref()).peekable();
        if rest.peek() == Some(&ROOT_ITEM) {
            rest.next();
        }

        let mut steps = vec![self.root()?];
        for choice in rest {
            let next = self.descend(&steps[steps.len() - 1], choice)?;
            steps.push(next);
        }
        logd!(
            "Navigator: area={} walk depth={} item={}",
            self.area,
            steps.len(),
            steps[steps.len() - 1].item()
        );
        Ok(Walk { steps })
    }

    fn step(&self, levels: Vec<String>) -> Result<Step> {
        let item = levels.last().cloned().unwrap_or_else(|| ROOT_ITEM.to_string());
        let main_weight = self
            .weights
            .get(&item)
            .ok_or_else(|| Error::UnknownItem(item.clone()))?
            .weight(self.area);
        let locator = self.child_locator(&item)?;

        let children = self.children(&locator);
        let ratios = self.reconcile(&item, main_weight, &children)?;

        let mut options: Vec<&str> = children
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| self.weights.get(name).is_some_and(|w| w.is_selectable()))
            .collect();
        options.sort_by_key(|name| self.weights.position(name));
        let options = options.into_iter().map(str::to_string).collect();

        let mut series = Vec::with_capacity(children.len() + 1);
        series.push((item.clone(), self.cpi.series(&item)));
        series.extend(children);

        Ok(Step {
            levels,
            child_parent: locator,
            table: SeriesTable::from_series(series),
            ratios,
            options,
        })
    }

    /// CPI rows under `locator`, known to the weight table, pivoted to one
    /// series per child. Ordered by level, then name.
    fn children(&self, locator: &str) -> Vec<(String, BTreeMap<Month, f64>)> {
        let mut ix: HashMap<&str, usize> = HashMap::new();
        let mut keyed: Vec<(u32, String, BTreeMap<Month, f64>)> = Vec::new();

        for r in self.cpi.children_of(locator) {
            if !self.weights.contains(&r.name) {
                continue;
            }
            let slot = *ix.entry(r.name.as_str()).or_insert_with(|| {
                keyed.push((r.level, r.name.clone(), BTreeMap::new()));
                keyed.len() - 1
            });
            keyed[slot].2.insert(r.month, r.value);
        }

        keyed.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
        keyed.into_iter().map(|(_, name, s)| (name, s)).collect()
    }

    /// Children's weights must add up to the parent's; shares follow.
    fn reconcile(
        &self,
        item: &str,
        main_weight: f64,
        children: &[(String, BTreeMap<Month, f64>)],
    ) -> Result<WeightRatios> {
        if children.is_empty() {
            return Ok(WeightRatios::new());
        }

        let weights: Vec<(&str, f64)> = children
            .iter()
            .filter_map(|(name, _)| self.weights.get(name).map(|w| (name.as_str(), w.weight(self.area))))
            .collect();
        let sum: f64 = weights.iter().map(|(_, w)| w).sum();

        if !weights_match(sum, main_weight) {
            loge!("Navigator: {} ({}) children sum {} != {}", item, self.area, sum, main_weight);
            return Err(Error::Integrity {
                item: item.to_string(),
                area: self.area,
                expected: main_weight,
                actual: sum,
            });
        }

        Ok(weights
            .into_iter()
            .map(|(name, w)| {
                let share = if main_weight == 0.0 { 0.0 } else { w / main_weight };
                (name.to_string(), share)
            })
            .collect())
    }

    /// Check reconciliation for every class item in the weight table that has
    /// children in this area's CPI table. Returns the failures.
    pub fn audit(&self) -> Vec<Error> {
        self.weights
            .rows()
            .iter()
            .filter(|w| w.is_selectable())
            .filter_map(|w| {
                let locator = self.child_locator(&w.name).ok()?;
                let children = self.children(&locator);
                self.reconcile(&w.name, w.weight(self.area), &children).err()
            })
            .collect()
    }
}

/// Equality up to an absolute `WEIGHT_TOLERANCE`. Published weights are small
/// integers, so their float sums are exact and any real gap is a data error.
pub fn weights_match(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= WEIGHT_TOLERANCE
}
