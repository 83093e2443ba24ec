// src/core/month.rs
//
// Calendar month as used throughout: users type `YYYY-MM`, e-Stat speaks
// period codes `YYYY00MMMM` (monthly) and `YYYY000000`-style codes ending in
// `00` for annual aggregates.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Months since year 0; handy as a chart axis.
    pub fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_index(ix: i64) -> Self {
        let year = ix.div_euclid(12) as i32;
        let month = ix.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }

    pub fn offset(self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }

    pub fn succ(self) -> Self {
        self.offset(1)
    }

    /// Every month from `start` to `end`, both included. Empty if `end < start`.
    pub fn range_inclusive(start: Month, end: Month) -> Vec<Month> {
        (start.index()..=end.index()).map(Month::from_index).collect()
    }

    /// e-Stat period code, e.g. 2020-01 → `2020000101`.
    pub fn period_code(&self) -> String {
        format!("{:04}00{:02}{:02}", self.year, self.month, self.month)
    }

    /// Inverse of [`Month::period_code`]. Annual codes (ending in `00`) and
    /// anything malformed give `None`.
    pub fn from_period_code(code: &str) -> Option<Self> {
        if code.len() != 10 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = code[..4].parse().ok()?;
        let month: u32 = code[8..].parse().ok()?;
        Self::new(year, month)
    }

    /// Parse `YYYY-MM` (a trailing `-DD` is tolerated and ignored).
    pub fn parse(text: &str) -> Result<Self> {
        let t = text.trim();
        let full = if t.len() == 7 { format!("{t}-01") } else { t.to_string() };
        NaiveDate::parse_from_str(&full, "%Y-%m-%d")
            .map(Self::of)
            .map_err(|_| Error::Config(format!("invalid month {text:?} (expected YYYY-MM)")))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Month::parse(s)
    }
}
